use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub introspection: IntrospectionConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntrospectionConfig {
    pub internal_namespace: String,
    pub migration_table: String,
    pub attachment_models: Vec<String>,
    pub hidden_columns: Vec<String>,
    pub write_only_columns: Vec<String>,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            internal_namespace: defaults::DEFAULT_INTERNAL_NAMESPACE.to_string(),
            migration_table: defaults::DEFAULT_MIGRATION_TABLE.to_string(),
            attachment_models: defaults::DEFAULT_ATTACHMENT_MODELS
                .iter()
                .map(|model| model.to_string())
                .collect(),
            hidden_columns: Vec::new(),
            write_only_columns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: defaults::DEFAULT_PRETTY_OUTPUT,
        }
    }
}
