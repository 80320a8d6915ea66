use anyhow::{Result, bail};

use super::{AppConfig, defaults};

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();
    let introspection = &cfg.introspection;

    if introspection.internal_namespace.trim().is_empty() {
        errors.push("introspection.internal_namespace must not be empty".to_string());
    }

    if introspection.migration_table.trim().is_empty() {
        errors.push("introspection.migration_table must not be empty".to_string());
    }

    for column in &introspection.hidden_columns {
        if introspection.write_only_columns.contains(column) {
            errors.push(format!(
                "column '{column}' cannot be both hidden and write-only"
            ));
        }
    }

    for column in introspection
        .hidden_columns
        .iter()
        .chain(introspection.write_only_columns.iter())
    {
        if defaults::READ_ONLY_COLUMNS.contains(&column.as_str()) {
            errors.push(format!(
                "column '{column}' is always read-only and cannot be overridden"
            ));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}
