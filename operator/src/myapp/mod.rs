//! MyApp is a k8s custom resource that asks the operator to create a fixed StatefulSet.

// Export all spec types
mod spec;
pub use spec::*;

// All other mods are behind the controller flag to keep the deps to a minimum
#[cfg(feature = "controller")]
pub(crate) mod controller;
/// Stateful set created for MyApp resources with the `create` message.
#[cfg(feature = "controller")]
pub mod stateful_set;

#[cfg(test)]
#[cfg(feature = "controller")]
pub mod stub;

#[cfg(feature = "controller")]
pub use controller::{run, Opts};
