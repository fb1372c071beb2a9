//! Test doubles for the bootstrap interfaces.
//!
//! Provides programmable recorders that stand in for real collaborators in
//! unit tests:
//! - [`MockMetricsReporter`] for [`bootstrap::MetricsReporter`]

mod mocks;

pub use mocks::*;
