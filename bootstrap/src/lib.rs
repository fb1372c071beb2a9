//! # Bootstrap Interfaces
//!
//! Types and traits shared between an application service and the generic
//! bootstrap subsystem that composes it at start-up.
//!
//! This crate provides:
//! - Configuration sections owned by the platform (registry, service, message
//!   bus, clients, secrets, telemetry)
//! - The [`Configuration`] adapter contract a service configuration implements
//! - The [`MetricsReporter`] contract and the [`MetricsRegistry`] handle it
//!   reports from
//!
//! None of these types carry behaviour beyond plain data access.

pub mod config;
pub mod interfaces;
pub mod registry;

pub use config::{
    BootstrapConfiguration, ClientInfo, InsecureSecrets, InsecureSecretsInfo, MessageBusInfo,
    RegistryInfo, ServiceInfo, TelemetryInfo
};
pub use interfaces::{Configuration, MetricTags, MetricsReporter};
pub use registry::MetricsRegistry;
