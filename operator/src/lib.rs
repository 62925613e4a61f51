//! Provides API for the MyApp operator and related tooling.
#![warn(missing_docs)]

/// Labels module for managing resource labels.
#[cfg(feature = "controller")]
pub(crate) mod labels;
/// MyApp module for reconciling MyApp resources.
pub mod myapp;
/// Utils module for shared utility functions.
#[cfg(feature = "controller")]
pub mod utils;

/// Name used as the field manager and managed-by label value for created resources.
#[cfg(feature = "controller")]
const CONTROLLER_NAME: &str = "myapp-operator";
