//! # Configuration Structures
//!
//! The configuration tree of an application service.
//!
//! All configuration structures:
//! - Use `serde` with `PascalCase` field names matching the configuration
//!   documents the configuration provider reads
//! - Default to zero values (empty strings, empty maps, `false`)
//! - Store enumerated settings as free strings; typed accessors parse them on
//!   demand and `validator` checks them when asked to

use crate::types::{AuthMode, HttpProtocol, LogLevel, TargetType, TriggerType};
use bootstrap::{
    ClientInfo, InsecureSecrets, MessageBusInfo, RegistryInfo, ServiceInfo, TelemetryInfo
};
use errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Top-level configuration of an application service.
///
/// # Purpose
/// Aggregates the platform sections the bootstrap subsystem consumes
/// (`Registry`, `Service`, `MessageBus`, `Clients`) with the sections specific
/// to a function-pipeline service (`Writable`, `HttpServer`, `Trigger`,
/// `ApplicationSettings`).
///
/// # Usage
/// ```rust
/// use bootstrap::Configuration;
/// use config::{Config, WritableConfig};
///
/// let mut config = Config::default();
/// config.writable.log_level = "INFO".to_string();
/// assert_eq!(config.log_level(), "INFO");
///
/// let mut update = WritableConfig::default();
/// update.log_level = "DEBUG".to_string();
/// assert!(config.update_writable_from_raw(&update));
/// assert_eq!(config.log_level(), "DEBUG");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "PascalCase")]
pub struct Config {
    /// Settings that may change at runtime without a restart
    #[validate(nested)]
    pub writable: WritableConfig,

    /// How to reach the service registry
    pub registry: RegistryInfo,

    /// Standard service identity and HTTP tuning
    pub service: ServiceInfo,

    /// HTTP listener settings
    #[validate(nested)]
    pub http_server: HttpServerConfig,

    /// Platform message bus connection
    pub message_bus: MessageBusInfo,

    /// Pipeline ingress
    #[validate(nested)]
    pub trigger: TriggerConfig,

    /// Arbitrary settings for the service's own functions
    pub application_settings: HashMap<String, String>,

    /// Outbound platform clients keyed by logical client name
    pub clients: HashMap<String, ClientInfo>
}

/// Settings that may change on the fly without restarting the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "PascalCase")]
pub struct WritableConfig {
    /// One of TRACE, DEBUG, INFO, WARN, ERROR
    #[validate(custom(function = "validate_log_level"))]
    pub log_level: String,

    #[validate(nested)]
    pub pipeline: PipelineConfig,

    pub store_and_forward: StoreAndForwardConfig,

    pub insecure_secrets: InsecureSecrets,

    pub telemetry: TelemetryInfo
}

impl WritableConfig {
    pub fn parsed_log_level(&self) -> Result<LogLevel, ConfigError> {
        parse_enum("Writable.LogLevel", &self.log_level)
    }
}

/// Configurable function pipelines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "PascalCase")]
#[validate(schema(function = "validate_target_type_flags"))]
pub struct PipelineConfig {
    /// Comma separated function identifiers of the default pipeline, in
    /// execution order
    pub execution_order: String,

    /// Pipelines that only run when the incoming topic matches, keyed by an
    /// arbitrary caller supplied identifier
    pub per_topic_pipelines: HashMap<String, TopicPipeline>,

    pub use_target_type_of_byte_array: bool,

    pub use_target_type_of_metric: bool,

    /// Configured functions keyed by a unique identifier that starts with the
    /// name of a built-in function
    pub functions: HashMap<String, PipelineFunction>
}

impl PipelineConfig {
    /// Decodes the legacy target type flags.
    pub fn target_type(&self) -> Result<TargetType, ConfigError> {
        match (self.use_target_type_of_byte_array, self.use_target_type_of_metric) {
            (true, true) => Err(ConfigError::ConflictingTargetType),
            (true, false) => Ok(TargetType::Raw),
            (false, true) => Ok(TargetType::Metric),
            (false, false) => Ok(TargetType::Default)
        }
    }

    /// Encodes `target_type` into the legacy flags.
    pub fn set_target_type(&mut self, target_type: TargetType) {
        self.use_target_type_of_byte_array = target_type == TargetType::Raw;
        self.use_target_type_of_metric = target_type == TargetType::Metric;
    }

    pub fn execution_order_functions(&self) -> Vec<&str> {
        split_comma_list(&self.execution_order)
    }
}

/// A pipeline that only runs for matching topics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TopicPipeline {
    /// Unique id of the pipeline instance
    pub id: String,

    /// Comma separated topics the incoming topic is matched against
    pub topics: String,

    /// Comma separated function identifiers, in execution order
    pub execution_order: String
}

impl TopicPipeline {
    pub fn topic_list(&self) -> Vec<&str> {
        split_comma_list(&self.topics)
    }

    pub fn execution_order_functions(&self) -> Vec<&str> {
        split_comma_list(&self.execution_order)
    }
}

/// Parameters of one configured built-in function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PipelineFunction {
    pub parameters: HashMap<String, String>
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StoreAndForwardConfig {
    pub enabled: bool,

    /// Time between retries, as a duration string
    pub retry_interval: String,

    pub max_retry_count: i32
}

/// Pipeline trigger settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "PascalCase")]
#[validate(schema(function = "validate_external_mqtt_trigger"))]
pub struct TriggerConfig {
    /// One of http, edgex-messagebus, external-mqtt
    #[serde(rename = "Type")]
    #[validate(custom(function = "validate_trigger_type"))]
    pub trigger_type: String,

    /// Only consulted when `trigger_type` is external-mqtt
    pub external_mqtt: ExternalMqttConfig
}

impl TriggerConfig {
    pub fn parsed_type(&self) -> Result<TriggerType, ConfigError> {
        parse_enum("Trigger.Type", &self.trigger_type)
    }
}

/// Additional settings for the HTTP listener.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "PascalCase")]
#[validate(schema(function = "validate_https_secrets"))]
pub struct HttpServerConfig {
    /// HTTP or HTTPS. HTTPS requires the certificate and key in the secret
    /// store.
    #[validate(custom(function = "validate_http_protocol"))]
    pub protocol: String,

    /// Secret store entry holding the HTTPS certificate and key
    pub secret_name: String,

    #[serde(rename = "HTTPSCertName")]
    pub https_cert_name: String,

    #[serde(rename = "HTTPSKeyName")]
    pub https_key_name: String
}

impl HttpServerConfig {
    pub fn parsed_protocol(&self) -> Result<HttpProtocol, ConfigError> {
        parse_enum("HttpServer.Protocol", &self.protocol)
    }
}

/// MQTT broker settings for the external-mqtt trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ExternalMqttConfig {
    /// Fully qualified broker URL
    pub url: String,

    /// Comma separated topics to subscribe to
    pub subscribe_topics: String,

    /// Topic pipeline output is published to, if any
    pub publish_topic: String,

    pub client_id: String,

    /// Broker connection timeout, as a duration string
    pub connect_timeout: String,

    pub auto_reconnect: bool,

    /// Seconds between client pings while no data is flowing
    pub keep_alive: i64,

    #[serde(rename = "QoS")]
    pub qos: u8,

    pub retain: bool,

    pub skip_cert_verify: bool,

    /// Secret store path holding the broker credentials
    pub secret_path: String,

    /// One of none, cacert, usernamepassword, clientcert
    pub auth_mode: String,

    /// Seconds to keep retrying client creation
    pub retry_duration: i32,

    /// Seconds between client creation attempts
    pub retry_interval: i32
}

impl ExternalMqttConfig {
    pub fn parsed_auth_mode(&self) -> Result<AuthMode, ConfigError> {
        parse_enum("Trigger.ExternalMqtt.AuthMode", &self.auth_mode)
    }

    pub fn subscribe_topic_list(&self) -> Vec<&str> {
        split_comma_list(&self.subscribe_topics)
    }
}

/// Username and password pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Credentials {
    pub username: String,
    pub password: String
}

fn parse_enum<T: FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    T::from_str(value).map_err(|_| ConfigError::invalid_value(field, value))
}

fn split_comma_list(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

fn validate_log_level(value: &str) -> Result<(), ValidationError> {
    LogLevel::from_str(value)
        .map(|_| ())
        .map_err(|_| invalid("log_level", "LogLevel must be one of TRACE, DEBUG, INFO, WARN, ERROR"))
}

fn validate_trigger_type(value: &str) -> Result<(), ValidationError> {
    TriggerType::from_str(value).map(|_| ()).map_err(|_| {
        invalid(
            "trigger_type",
            "Trigger Type must be one of http, edgex-messagebus, external-mqtt"
        )
    })
}

fn validate_http_protocol(value: &str) -> Result<(), ValidationError> {
    HttpProtocol::from_str(value)
        .map(|_| ())
        .map_err(|_| invalid("http_protocol", "HttpServer Protocol must be HTTP or HTTPS"))
}

fn validate_target_type_flags(pipeline: &PipelineConfig) -> Result<(), ValidationError> {
    pipeline.target_type().map(|_| ()).map_err(|_| {
        invalid(
            "target_type",
            "At most one of UseTargetTypeOfByteArray and UseTargetTypeOfMetric may be set"
        )
    })
}

fn validate_https_secrets(http: &HttpServerConfig) -> Result<(), ValidationError> {
    if !matches!(http.parsed_protocol(), Ok(HttpProtocol::Https)) {
        return Ok(());
    }
    if http.secret_name.is_empty()
        || http.https_cert_name.is_empty()
        || http.https_key_name.is_empty()
    {
        return Err(invalid(
            "https_secrets",
            "HTTPS requires SecretName, HTTPSCertName and HTTPSKeyName"
        ));
    }
    Ok(())
}

fn validate_external_mqtt_trigger(trigger: &TriggerConfig) -> Result<(), ValidationError> {
    if !matches!(trigger.parsed_type(), Ok(TriggerType::ExternalMqtt)) {
        return Ok(());
    }
    let mqtt = &trigger.external_mqtt;
    if mqtt.url.is_empty() {
        return Err(invalid("external_mqtt_url", "external-mqtt trigger requires ExternalMqtt Url"));
    }
    if mqtt.parsed_auth_mode().is_err() {
        return Err(invalid(
            "external_mqtt_auth_mode",
            "ExternalMqtt AuthMode must be one of none, cacert, usernamepassword, clientcert"
        ));
    }
    Ok(())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}
