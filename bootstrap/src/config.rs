//! # Bootstrap Configuration Sections
//!
//! Configuration sections whose shape is owned by the platform rather than by
//! an individual service. Services embed them in their own configuration
//! structure and hand them back through
//! [`Configuration`](crate::interfaces::Configuration).
//!
//! Field names follow the platform's configuration documents exactly
//! (`PascalCase`), so every struct here is `#[serde(rename_all = "PascalCase")]`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connection details for the service registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RegistryInfo {
    /// Registry host name
    pub host: String,

    /// Registry port
    pub port: i32,

    /// Registry implementation, e.g. "consul"
    #[serde(rename = "Type")]
    pub registry_type: String
}

/// Generic service identity and HTTP tuning shared by all services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ServiceInfo {
    /// Interval between registry health checks, as a duration string
    pub health_check_interval: String,

    /// Host name the service advertises
    pub host: String,

    /// Port the service listens on
    pub port: i32,

    /// Address the HTTP listener binds to, empty for `Host`
    pub server_bind_addr: String,

    /// Message logged once the service has started
    pub startup_msg: String,

    /// Upper bound on results returned by query endpoints
    pub max_result_count: i32,

    /// Upper bound on request body size in kilobytes, 0 for unlimited
    pub max_request_size: i64,

    /// Request timeout, as a duration string
    pub request_timeout: String
}

/// Connection details for the platform message bus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MessageBusInfo {
    pub disabled: bool,

    #[serde(rename = "Type")]
    pub bus_type: String,

    pub protocol: String,

    pub host: String,

    pub port: i32,

    pub auth_mode: String,

    pub secret_name: String,

    pub base_topic_prefix: String,

    /// Implementation specific options passed through to the bus client
    pub optional: HashMap<String, String>
}

/// Endpoint of a platform service this service calls out to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ClientInfo {
    pub host: String,

    pub port: i32,

    pub protocol: String,

    /// Whether the client talks over the message bus instead of HTTP
    pub use_message_bus: bool
}

impl ClientInfo {
    /// Base URL of the client endpoint, e.g. `http://localhost:59880`.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// A single secret held in configuration instead of a secret store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InsecureSecretsInfo {
    /// Name the secret is looked up by
    pub secret_name: String,

    /// Secret key/value pairs
    pub secret_data: HashMap<String, String>
}

/// Secrets held in memory, keyed by an arbitrary entry name.
pub type InsecureSecrets = HashMap<String, InsecureSecretsInfo>;

/// Service telemetry settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TelemetryInfo {
    /// Reporting interval, as a duration string
    pub interval: String,

    /// Metric name to enabled flag
    pub metrics: HashMap<String, bool>,

    /// Tags attached to every reported metric
    pub tags: HashMap<String, String>
}

impl TelemetryInfo {
    /// Returns the configured metric name that enables `metric_name`.
    ///
    /// A configured name enables every metric whose name starts with it, so
    /// `"Events"` covers both `"EventsSent"` and `"EventsPersisted"`. When
    /// several enabled names match, the longest one wins.
    pub fn enabled_metric_name(&self, metric_name: &str) -> Option<&str> {
        self.metrics
            .iter()
            .filter(|(name, enabled)| **enabled && metric_name.starts_with(name.as_str()))
            .map(|(name, _)| name.as_str())
            .max_by_key(|name| name.len())
    }
}

/// The configuration elements the bootstrap subsystem needs from a service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapConfiguration {
    pub clients: HashMap<String, ClientInfo>,
    pub service: ServiceInfo,
    pub registry: RegistryInfo,
    pub message_bus: MessageBusInfo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_info_url() {
        let client = ClientInfo {
            host: "localhost".to_string(),
            port: 59880,
            protocol: "http".to_string(),
            use_message_bus: false
        };
        assert_eq!(client.url(), "http://localhost:59880");
    }

    #[test]
    fn test_enabled_metric_name_prefix_match() {
        let mut telemetry = TelemetryInfo::default();
        telemetry.metrics.insert("Events".to_string(), true);
        telemetry.metrics.insert("Readings".to_string(), false);

        assert_eq!(telemetry.enabled_metric_name("EventsPersisted"), Some("Events"));
        assert_eq!(telemetry.enabled_metric_name("ReadingsPersisted"), None);
        assert_eq!(telemetry.enabled_metric_name("Unknown"), None);
    }

    #[test]
    fn test_enabled_metric_name_prefers_longest_prefix() {
        let mut telemetry = TelemetryInfo::default();
        telemetry.metrics.insert("Events".to_string(), true);
        telemetry.metrics.insert("EventsPersisted".to_string(), true);
        telemetry.metrics.insert("EventsPersistedBytes".to_string(), false);

        for _ in 0..50 {
            let fresh = telemetry.clone();
            assert_eq!(
                fresh.enabled_metric_name("EventsPersistedBytes"),
                Some("EventsPersisted")
            );
            assert_eq!(fresh.enabled_metric_name("EventsSent"), Some("Events"));
        }
    }

    #[test]
    fn test_registry_info_field_names() {
        let registry: RegistryInfo =
            serde_json::from_str(r#"{"Host":"localhost","Port":8500,"Type":"consul"}"#).unwrap();
        assert_eq!(registry.host, "localhost");
        assert_eq!(registry.port, 8500);
        assert_eq!(registry.registry_type, "consul");
    }

    #[test]
    fn test_insecure_secrets_default_is_empty() {
        let info = InsecureSecretsInfo::default();
        assert!(info.secret_name.is_empty());
        assert!(info.secret_data.is_empty());
    }
}
