//! # Bootstrap Adapter
//!
//! Implements [`bootstrap::Configuration`] for [`Config`] so the generic
//! bootstrap subsystem can replace and read the service configuration.
//!
//! Updates arrive as `&dyn Any`, either the value itself or the box handed
//! out by [`Configuration::empty_writable`]. A value of the wrong type is
//! reported only through the `false` result: nothing is logged and nothing
//! changes.

use crate::config::{Config, WritableConfig};
use bootstrap::{
    BootstrapConfiguration, Configuration, InsecureSecrets, RegistryInfo, ServiceInfo,
    TelemetryInfo
};
use std::any::Any;
use tracing::debug;

impl Configuration for Config {
    /// Replaces the whole configuration when `raw_config` is a [`Config`].
    fn update_from_raw(&mut self, raw_config: &dyn Any) -> bool {
        let Some(configuration) = downcast_raw::<Config>(raw_config) else {
            return false;
        };
        *self = configuration.clone();
        debug!(log_level = %self.writable.log_level, "Configuration replaced");
        true
    }

    /// Template the configuration provider deserializes writable updates into.
    fn empty_writable(&self) -> Box<dyn Any + Send> {
        Box::new(WritableConfig::default())
    }

    /// Replaces the writable section when `raw_writable` is a
    /// [`WritableConfig`].
    fn update_writable_from_raw(&mut self, raw_writable: &dyn Any) -> bool {
        let Some(writable) = downcast_raw::<WritableConfig>(raw_writable) else {
            return false;
        };
        self.writable = writable.clone();
        debug!(log_level = %self.writable.log_level, "Writable configuration replaced");
        true
    }

    fn bootstrap_config(&self) -> BootstrapConfiguration {
        BootstrapConfiguration {
            clients: self.clients.clone(),
            service: self.transform_to_bootstrap_service_info(),
            registry: self.registry.clone(),
            message_bus: self.message_bus.clone()
        }
    }

    fn log_level(&self) -> &str {
        &self.writable.log_level
    }

    fn registry_info(&self) -> &RegistryInfo {
        &self.registry
    }

    fn insecure_secrets(&self) -> &InsecureSecrets {
        &self.writable.insecure_secrets
    }

    fn telemetry_info(&self) -> &TelemetryInfo {
        &self.writable.telemetry
    }
}

impl Config {
    /// Maps this service's `Service` section onto the bootstrap's version.
    ///
    /// The two shapes are currently identical.
    fn transform_to_bootstrap_service_info(&self) -> ServiceInfo {
        self.service.clone()
    }
}

/// Resolves `raw` to a `T`, looking through `Box<dyn Any>` and `Box<T>`
/// wrappers.
fn downcast_raw<T: Any>(raw: &dyn Any) -> Option<&T> {
    let raw: &dyn Any = if let Some(boxed) = raw.downcast_ref::<Box<dyn Any + Send>>() {
        &**boxed
    } else if let Some(boxed) = raw.downcast_ref::<Box<dyn Any>>() {
        &**boxed
    } else {
        raw
    };
    raw.downcast_ref::<T>()
        .or_else(|| raw.downcast_ref::<Box<T>>().map(|boxed| &**boxed))
}
