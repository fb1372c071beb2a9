//! # Application Service Errors
//!
//! Error types shared by the configuration model and the telemetry interfaces.
//!
//! - Uses `thiserror` for structured error definitions
//! - Named fields in every variant so messages stay self-describing

use thiserror::Error;

/// Errors raised while interpreting configuration values.
///
/// The configuration adapter itself never produces these; they come from the
/// typed accessors and the explicit validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("Pipeline sets both UseTargetTypeOfByteArray and UseTargetTypeOfMetric")]
    ConflictingTargetType
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into()
        }
    }
}

/// Metrics reporter errors.
///
/// `Clone` and `PartialEq` so a scripted error can be compared with the one a
/// caller received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReporterError {
    #[error("Transport unavailable: {reason}")]
    TransportUnavailable { reason: String },

    #[error("Report of {metric} failed: {reason}")]
    ReportFailed { metric: String, reason: String },

    #[error("Reporter error: {message}")]
    Other { message: String }
}
