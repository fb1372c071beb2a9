//! # Configuration Validation
//!
//! Opt-in validation of the enumerated and conditional settings using the
//! `validator` crate. The bootstrap adapter never validates; services call
//! [`validate`] when they want diagnostics for what they were handed.

use crate::config::Config;
use tracing::warn;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Validate a configuration tree.
///
/// # Rules
/// - `Writable.LogLevel`: TRACE, DEBUG, INFO, WARN or ERROR
/// - `Writable.Pipeline`: at most one of `UseTargetTypeOfByteArray` and
///   `UseTargetTypeOfMetric`
/// - `HttpServer.Protocol`: HTTP or HTTPS; HTTPS also requires `SecretName`,
///   `HTTPSCertName` and `HTTPSKeyName`
/// - `Trigger.Type`: http, edgex-messagebus or external-mqtt; external-mqtt
///   also requires `ExternalMqtt.Url` and a valid `ExternalMqtt.AuthMode`
///
/// Every failure is logged at `warn` before the errors are returned.
pub fn validate(config: &Config) -> Result<(), ValidationErrors> {
    config.validate().inspect_err(|errors| {
        for failure in validation_failures(errors) {
            warn!(failure = %failure, "Invalid configuration");
        }
    })
}

/// Flattens nested validation errors into `path: message` lines, sorted.
pub fn validation_failures(errors: &ValidationErrors) -> Vec<String> {
    let mut failures = Vec::new();
    collect_failures(errors, "", &mut failures);
    failures.sort();
    failures
}

fn collect_failures(errors: &ValidationErrors, prefix: &str, failures: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error.message.as_ref().unwrap_or(&error.code);
                    failures.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_failures(nested, &format!("{path}."), failures);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_failures(nested, &format!("{path}[{index}]."), failures);
                }
            }
        }
    }
}
