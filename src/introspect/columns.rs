use serde_json::Value;

use super::{tables::SchemaTables, validators::normalize_validators};
use crate::{naming, registry::ModelSource, schema::ColumnSchema};

/// Column records in declared storage order. The model is instantiated once
/// and every default is read from that single snapshot.
pub fn extract_columns(model: &dyn ModelSource, tables: &SchemaTables) -> Vec<ColumnSchema> {
    let snapshot = model.instantiate();
    model
        .columns()
        .iter()
        .map(|column| ColumnSchema {
            name: column.name.clone(),
            display_name: naming::humanize(&column.name),
            column_type: tables.canonical_type(&column.sql_type),
            access_type: tables.access_type(&column.name),
            default_value: snapshot.get(&column.name).cloned().unwrap_or(Value::Null),
            validators: normalize_validators(&model.validations(&column.name)),
            is_virtual: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use serde_json::json;

    use super::*;
    use crate::{
        registry::{Attributes, ModelEntry, ValidationRule},
        schema::{AccessType, Constraint},
    };

    #[test]
    fn columns_follow_declared_order_with_canonical_types() {
        let model = ModelEntry::new("Ledger", "ledgers")
            .column("id", "bigint")
            .column("name", "character varying")
            .column("geo", "geography(Point,4326)")
            .column("created_at", "timestamp without time zone");

        let columns = extract_columns(&model, &SchemaTables::default());

        let summary: Vec<(&str, &str, AccessType)> = columns
            .iter()
            .map(|column| {
                (
                    column.name.as_str(),
                    column.column_type.as_str(),
                    column.access_type,
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("id", "integer", AccessType::ReadOnly),
                ("name", "string", AccessType::ReadWrite),
                ("geo", "geography(Point,4326)", AccessType::ReadWrite),
                ("created_at", "datetime", AccessType::ReadOnly),
            ]
        );
        assert!(columns.iter().all(|column| !column.is_virtual));
    }

    #[test]
    fn model_is_instantiated_once_for_all_defaults() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let model = ModelEntry::new("Task", "tasks")
            .column("done", "boolean")
            .column("priority", "integer")
            .column("title", "varchar")
            .instantiate_with(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Attributes::from([
                    ("done".to_string(), json!(false)),
                    ("priority".to_string(), json!(3)),
                ])
            });

        let columns = extract_columns(&model, &SchemaTables::default());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(columns[0].default_value, json!(false));
        assert_eq!(columns[1].default_value, json!(3));
        assert_eq!(columns[2].default_value, Value::Null);
    }

    #[test]
    fn validators_attach_to_their_column() {
        let model = ModelEntry::new("Task", "tasks")
            .column("title", "varchar")
            .column("notes", "text")
            .validates("title", ValidationRule::Presence);

        let columns = extract_columns(&model, &SchemaTables::default());

        assert_eq!(columns[0].validators, vec![Constraint::Required(true)]);
        assert!(columns[1].validators.is_empty());
        assert_eq!(columns[1].display_name, "Notes");
    }
}
