use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::registry::BoundOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    pub name: String,
    pub slug: String,
    pub table_name: String,
    pub primary_key: String,
    pub display_name: String,
    pub display_column: String,
    pub columns: Vec<ColumnSchema>,
    pub associations: Vec<AssociationSchema>,
    pub actions: Vec<ActionSchema>,
    pub tabs: Vec<TabSchema>,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub display_name: String,
    pub column_type: String,
    pub access_type: AccessType,
    pub default_value: Value,
    pub validators: Vec<Constraint>,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    ReadOnly,
    WriteOnly,
    ReadWrite,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationSchema {
    pub name: String,
    pub display_name: String,
    pub slug: String,
    pub model_name: String,
    pub model_slug: String,
    pub association_type: AssociationType,
    pub foreign_key: String,
    pub polymorphic: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationType {
    HasMany,
    HasOne,
    BelongsTo,
}

/// One normalized validation record, serialized as a single-key object such as
/// `{"required": true}` or `{"numeric": {"greater_than": 0}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Includes(Vec<Value>),
    Required(bool),
    Format(FormatConstraint),
    Length(BoundOptions),
    Numeric(BoundOptions),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConstraint {
    pub source: String,
    pub options: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSchema {
    pub name: String,
    pub action_type: ActionType,
    pub preferences: Map<String, Value>,
    pub visible: bool,
}

impl ActionSchema {
    pub fn default_action(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action_type: ActionType::Default,
            preferences: Map::new(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabType {
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSchema {
    pub name: String,
    pub tab_type: TabType,
    pub preferences: Map<String, Value>,
    pub visible: bool,
}

impl TabSchema {
    pub fn default_tab(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tab_type: TabType::Default,
            preferences: Map::new(),
            visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn constraints_serialize_as_single_key_objects() {
        let mut bounds = BoundOptions::new();
        bounds.insert("greater_than".to_string(), json!(0));

        let rendered = serde_json::to_value(vec![
            Constraint::Required(true),
            Constraint::Numeric(bounds),
            Constraint::Format(FormatConstraint {
                source: "^[a-z]+$".to_string(),
                options: 1,
            }),
        ])
        .expect("constraints should serialize");

        assert_eq!(
            rendered,
            json!([
                {"required": true},
                {"numeric": {"greater_than": 0}},
                {"format": {"source": "^[a-z]+$", "options": 1}}
            ])
        );
    }

    #[test]
    fn column_virtual_flag_uses_reserved_name() {
        let column = ColumnSchema {
            name: "name".to_string(),
            display_name: "Name".to_string(),
            column_type: "string".to_string(),
            access_type: AccessType::ReadWrite,
            default_value: Value::Null,
            validators: Vec::new(),
            is_virtual: false,
        };

        let rendered = serde_json::to_value(&column).expect("column should serialize");

        assert_eq!(rendered["virtual"], json!(false));
        assert_eq!(rendered["access_type"], json!("read_write"));
    }
}
