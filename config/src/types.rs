//! Typed views of the enumerated configuration strings.
//!
//! The configuration tree stores these values as free strings so that an
//! unexpected value never prevents an update from being applied. Consumers
//! parse them through the accessors on the configuration sections, which map
//! to these enums.

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Logging severity accepted by `Writable.LogLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR
        }
    }
}

/// Ingress feeding events into the function pipeline (`Trigger.Type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
pub enum TriggerType {
    #[strum(serialize = "http")]
    Http,

    #[strum(serialize = "edgex-messagebus")]
    EdgexMessageBus,

    #[strum(serialize = "external-mqtt")]
    ExternalMqtt
}

/// Scheme served by the HTTP listener (`HttpServer.Protocol`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpProtocol {
    Http,
    Https
}

/// Credentials used when connecting to an external MQTT broker
/// (`ExternalMqtt.AuthMode`).
///
/// A CA certificate found at the configured secret path is used by every
/// mode except `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AuthMode {
    None,
    CaCert,
    UsernamePassword,
    ClientCert
}

/// Type the pipeline hands to its first function.
///
/// Stored in configuration as the two legacy flags
/// `UseTargetTypeOfByteArray` and `UseTargetTypeOfMetric`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr, EnumIter
)]
#[strum(serialize_all = "lowercase")]
pub enum TargetType {
    /// Decoded platform events
    #[default]
    Default,

    /// Raw message bytes
    Raw,

    /// Decoded platform metrics
    Metric
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_log_level_catalogue() {
        let names: Vec<String> = LogLevel::iter().map(|level| level.to_string()).collect();
        assert_eq!(names, vec!["TRACE", "DEBUG", "INFO", "WARN", "ERROR"]);
    }

    #[test]
    fn test_log_level_is_case_sensitive() {
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("warn").is_err());
        assert!(LogLevel::from_str("").is_err());
    }

    #[test]
    fn test_log_level_into_tracing_level() {
        assert_eq!(tracing::Level::from(LogLevel::Trace), tracing::Level::TRACE);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
    }

    #[test]
    fn test_trigger_type_catalogue() {
        assert_eq!(TriggerType::from_str("http").unwrap(), TriggerType::Http);
        assert_eq!(
            TriggerType::from_str("edgex-messagebus").unwrap(),
            TriggerType::EdgexMessageBus
        );
        assert_eq!(
            TriggerType::from_str("external-mqtt").unwrap(),
            TriggerType::ExternalMqtt
        );
        assert!(TriggerType::from_str("mqtt").is_err());
        let name: &str = TriggerType::ExternalMqtt.as_ref();
        assert_eq!(name, "external-mqtt");
    }

    #[test]
    fn test_http_protocol_catalogue() {
        assert_eq!(HttpProtocol::from_str("HTTP").unwrap(), HttpProtocol::Http);
        assert_eq!(HttpProtocol::from_str("HTTPS").unwrap(), HttpProtocol::Https);
        assert!(HttpProtocol::from_str("https").is_err());
    }

    #[test]
    fn test_auth_mode_catalogue() {
        let names: Vec<String> = AuthMode::iter().map(|mode| mode.to_string()).collect();
        assert_eq!(
            names,
            vec!["none", "cacert", "usernamepassword", "clientcert"]
        );
        assert_eq!(
            AuthMode::from_str("usernamepassword").unwrap(),
            AuthMode::UsernamePassword
        );
    }

    #[test]
    fn test_target_type_default() {
        assert_eq!(TargetType::default(), TargetType::Default);
        assert_eq!(TargetType::Metric.to_string(), "metric");
    }
}
