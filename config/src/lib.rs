//! # Application Service Configuration
//!
//! Configuration model of a function-pipeline application service and its
//! adapter to the bootstrap subsystem.
//!
//! This crate provides:
//! - Configuration structures with the field names configuration documents use
//! - The [`bootstrap::Configuration`] implementation used to swap the whole
//!   tree or its writable section at runtime
//! - Typed views of the enumerated string settings
//! - Opt-in validation with `validator`

pub mod adapter;
pub mod config;
pub mod types;
pub mod validation;

pub use config::{
    Config, Credentials, ExternalMqttConfig, HttpServerConfig, PipelineConfig, PipelineFunction,
    StoreAndForwardConfig, TopicPipeline, TriggerConfig, WritableConfig
};
pub use types::{AuthMode, HttpProtocol, LogLevel, TargetType, TriggerType};
pub use validation::{validate, validation_failures};
pub use validator::Validate;
