//! Provides types and functions that are shared by the operator binaries.
#![deny(missing_docs)]
#[cfg(feature = "telemetry")]
pub mod telemetry;
