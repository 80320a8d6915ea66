use std::collections::HashMap;

use crate::{
    config::{IntrospectionConfig, defaults},
    schema::AccessType,
};

/// Raw storage type (lowercase, parameters stripped) -> canonical type.
pub const DEFAULT_TYPE_MAP: &[(&str, &str)] = &[
    ("char", "string"),
    ("character", "string"),
    ("varchar", "string"),
    ("character varying", "string"),
    ("citext", "string"),
    ("string", "string"),
    ("text", "text"),
    ("mediumtext", "text"),
    ("longtext", "text"),
    ("tinyint", "integer"),
    ("smallint", "integer"),
    ("int", "integer"),
    ("int2", "integer"),
    ("int4", "integer"),
    ("int8", "integer"),
    ("integer", "integer"),
    ("bigint", "integer"),
    ("tinyint unsigned", "integer"),
    ("smallint unsigned", "integer"),
    ("integer unsigned", "integer"),
    ("bigint unsigned", "integer"),
    ("serial", "integer"),
    ("bigserial", "integer"),
    ("real", "float"),
    ("float", "float"),
    ("float4", "float"),
    ("float8", "float"),
    ("double", "float"),
    ("double precision", "float"),
    ("decimal", "decimal"),
    ("numeric", "decimal"),
    ("money", "decimal"),
    ("bool", "boolean"),
    ("boolean", "boolean"),
    ("date", "date"),
    ("datetime", "datetime"),
    ("timestamp", "datetime"),
    ("timestamp without time zone", "datetime"),
    ("timestamp with time zone", "datetime"),
    ("timestamptz", "datetime"),
    ("time", "time"),
    ("time without time zone", "time"),
    ("json", "json"),
    ("jsonb", "json"),
    ("binary", "binary"),
    ("varbinary", "binary"),
    ("blob", "binary"),
    ("bytea", "binary"),
    ("uuid", "uuid"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRules {
    pub internal_namespace: String,
    pub migration_table: String,
    pub attachment_models: Vec<String>,
}

impl DiscoveryRules {
    pub fn is_internal(&self, model_name: &str) -> bool {
        in_namespace(model_name, &self.internal_namespace)
    }

    pub fn is_attachment_internal(&self, model_name: &str) -> bool {
        self.attachment_models.iter().any(|model| model == model_name)
    }
}

fn in_namespace(model_name: &str, namespace: &str) -> bool {
    model_name
        .strip_prefix(namespace)
        .is_some_and(|rest| rest.starts_with("::"))
}

/// Immutable lookup data for one or many pipeline runs. Built once at startup
/// and passed into the pipeline by reference.
#[derive(Debug, Clone)]
pub struct SchemaTables {
    type_map: HashMap<String, String>,
    access_overrides: HashMap<String, AccessType>,
    discovery: DiscoveryRules,
}

impl Default for SchemaTables {
    fn default() -> Self {
        Self::from_config(&IntrospectionConfig::default())
    }
}

impl SchemaTables {
    pub fn from_config(cfg: &IntrospectionConfig) -> Self {
        let type_map = DEFAULT_TYPE_MAP
            .iter()
            .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
            .collect();

        let mut access_overrides = HashMap::new();
        for column in &cfg.hidden_columns {
            access_overrides.insert(column.clone(), AccessType::Hidden);
        }
        for column in &cfg.write_only_columns {
            access_overrides.insert(column.clone(), AccessType::WriteOnly);
        }
        // Forced last so configuration can never loosen them.
        for column in defaults::READ_ONLY_COLUMNS {
            access_overrides.insert(column.to_string(), AccessType::ReadOnly);
        }

        Self {
            type_map,
            access_overrides,
            discovery: DiscoveryRules {
                internal_namespace: cfg.internal_namespace.clone(),
                migration_table: cfg.migration_table.clone(),
                attachment_models: cfg.attachment_models.clone(),
            },
        }
    }

    /// Canonical type for a raw storage type; unmapped types come back verbatim.
    pub fn canonical_type(&self, raw: &str) -> String {
        let base = raw.split('(').next().unwrap_or(raw).trim().to_lowercase();
        self.type_map
            .get(&base)
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }

    pub fn access_type(&self, column: &str) -> AccessType {
        self.access_overrides
            .get(column)
            .copied()
            .unwrap_or(AccessType::ReadWrite)
    }

    pub fn discovery(&self) -> &DiscoveryRules {
        &self.discovery
    }
}
