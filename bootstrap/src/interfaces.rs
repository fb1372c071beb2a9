//! Contracts between a service and the bootstrap subsystem.

use crate::config::{BootstrapConfiguration, InsecureSecrets, RegistryInfo, TelemetryInfo};
use crate::registry::MetricsRegistry;
use errors::ReporterError;
use std::any::Any;
use std::collections::HashMap;

/// Metric name to the tags reported alongside it.
pub type MetricTags = HashMap<String, HashMap<String, String>>;

/// Adapter a service configuration implements so the generic bootstrap
/// subsystem can swap and read it without knowing its concrete type.
///
/// The configuration provider deserializes updates into whatever value
/// [`empty_writable`](Configuration::empty_writable) (or the service itself)
/// handed out, and passes it back as `&dyn Any`, boxed or not. Implementations
/// downcast and report through the boolean result whether the value was
/// committed.
///
/// Implementations are not synchronized. Replacing takes `&mut self`, so
/// callers sharing a configuration between tasks wrap it in their own
/// reader-writer lock.
pub trait Configuration: Send + Sync {
    /// Overwrites the whole configuration with a copy of `raw_config`.
    ///
    /// Returns `false` and leaves `self` untouched when `raw_config` is not the
    /// implementing type.
    fn update_from_raw(&mut self, raw_config: &dyn Any) -> bool;

    /// Returns a freshly allocated, zero-valued writable section.
    fn empty_writable(&self) -> Box<dyn Any + Send>;

    /// Overwrites only the writable section with a copy of `raw_writable`.
    ///
    /// Returns `false` and leaves `self` untouched when `raw_writable` is not
    /// the implementation's writable type.
    fn update_writable_from_raw(&mut self, raw_writable: &dyn Any) -> bool;

    /// Returns the configuration elements required by the bootstrap subsystem.
    fn bootstrap_config(&self) -> BootstrapConfiguration;

    fn log_level(&self) -> &str;

    fn registry_info(&self) -> &RegistryInfo;

    fn insecure_secrets(&self) -> &InsecureSecrets;

    /// Telemetry settings, borrowed from the current writable section.
    ///
    /// The borrow ends before any writable update can run; re-query after
    /// each update to observe the new settings.
    fn telemetry_info(&self) -> &TelemetryInfo;
}

/// Exports the samples held in a [`MetricsRegistry`] to an external sink.
pub trait MetricsReporter: Send + Sync {
    fn report(
        &self,
        registry: &MetricsRegistry,
        metric_tags: &MetricTags
    ) -> Result<(), ReporterError>;
}
