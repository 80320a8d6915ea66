pub mod configs;
pub mod defaults;
pub mod envconfig;
pub mod validate;

pub use configs::{AppConfig, IntrospectionConfig, LoggingConfig, OutputConfig};
pub use envconfig::EnvConfig;
