//! Reads sea-orm entity metadata into catalog entries.

use std::{any::type_name, fmt::Debug};

use convert_case::{Case, Casing};
use sea_orm::sea_query::{ColumnType, TableRef, Value as QueryValue};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, EntityName, EntityTrait, IdenStatic,
    Identity, Iterable, PrimaryKeyToColumn, RelationDef, RelationTrait, RelationType,
};
use serde_json::Value as JsonValue;

use super::{
    Attributes, ModelCatalog, ModelEntry, ModelSource, RelationDecl, RelationKind,
    RelationTarget, ValidationRule,
};

/// What sea-orm cannot express about an entity. Every method has a default, so
/// `impl EntityAnnotations for Entity {}` is enough for plain entities.
pub trait EntityAnnotations: EntityTrait {
    fn model_name() -> String {
        entity_name_from_type_name(type_name::<Self>())
    }

    fn is_abstract() -> bool {
        false
    }

    fn validations() -> Vec<(&'static str, ValidationRule)> {
        Vec::new()
    }

    /// Relation names (snake case) whose target varies per row.
    fn polymorphic_relations() -> &'static [&'static str] {
        &[]
    }
}

struct PendingRelation {
    decl: RelationDecl,
    to_tbl: TableRef,
}

struct PendingEntity {
    entry: ModelEntry,
    table_ref: TableRef,
    relations: Vec<PendingRelation>,
}

/// Collects sea-orm entities and resolves relation targets between them.
#[derive(Default)]
pub struct OrmCatalogBuilder {
    entities: Vec<PendingEntity>,
    attachments: bool,
}

impl OrmCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attachments(mut self, enabled: bool) -> Self {
        self.attachments = enabled;
        self
    }

    pub fn entity<E>(mut self) -> Self
    where
        E: EntityAnnotations + 'static,
        E::ActiveModel: ActiveModelBehavior + ActiveModelTrait<Entity = E>,
        E::Relation: Debug,
    {
        let table_ref = E::default().table_ref();
        let relations = E::Relation::iter()
            .map(|relation| pending_relation::<E>(&relation))
            .collect();
        self.entities.push(PendingEntity {
            entry: entry_for_entity::<E>(),
            table_ref,
            relations,
        });
        self
    }

    pub fn build(self) -> ModelCatalog {
        let targets: Vec<(TableRef, String)> = self
            .entities
            .iter()
            .map(|pending| (pending.table_ref.clone(), pending.entry.name().to_string()))
            .collect();

        let mut catalog = ModelCatalog::new().with_attachments(self.attachments);
        for pending in self.entities {
            let mut entry = pending.entry;
            for relation in pending.relations {
                let mut decl = relation.decl;
                decl.target = targets
                    .iter()
                    .find(|(table_ref, _)| *table_ref == relation.to_tbl)
                    .map(|(_, name)| RelationTarget::Model(name.clone()))
                    .unwrap_or_else(|| {
                        RelationTarget::Unresolved(format!("{:?}", relation.to_tbl))
                    });
                entry = entry.relation(decl);
            }
            catalog.register(entry);
        }
        catalog
    }
}

/// Entry for a single entity. Relations are left out because their targets
/// can only be resolved against the other registered entities.
pub fn entry_for_entity<E>() -> ModelEntry
where
    E: EntityAnnotations + 'static,
    E::ActiveModel: ActiveModelBehavior + ActiveModelTrait<Entity = E>,
{
    let entity = E::default();
    let primary_key = E::PrimaryKey::iter()
        .map(|key| key.into_column().as_str().to_string())
        .collect::<Vec<_>>()
        .join(",");

    let mut entry = ModelEntry::new(E::model_name(), entity.table_name()).primary_key(primary_key);
    if E::is_abstract() {
        entry = entry.abstract_model();
    }
    for column in E::Column::iter() {
        let column_def = column.def();
        entry = entry.column(column.as_str(), sql_type_name(column_def.get_column_type()));
    }
    for (column, rule) in E::validations() {
        entry = entry.validates(column, rule);
    }
    entry.instantiate_with(default_attributes::<E>)
}

fn default_attributes<E>() -> Attributes
where
    E: EntityTrait,
    E::ActiveModel: ActiveModelBehavior + ActiveModelTrait<Entity = E>,
{
    let record = <E::ActiveModel as ActiveModelBehavior>::new();
    E::Column::iter()
        .map(|column| {
            let value = record
                .get(column)
                .into_value()
                .map(json_from_value)
                .unwrap_or(JsonValue::Null);
            (column.as_str().to_string(), value)
        })
        .collect()
}

fn pending_relation<E>(relation: &E::Relation) -> PendingRelation
where
    E: EntityAnnotations,
    E::Relation: Debug,
{
    let def = relation.def();
    let name = format!("{relation:?}").to_case(Case::Snake);
    let kind = relation_kind(&def);
    // has_many / has_one keep the key on the target table.
    let foreign_key = if def.is_owner {
        identity_columns(&def.to_col)
    } else {
        identity_columns(&def.from_col)
    };
    let polymorphic = E::polymorphic_relations().contains(&name.as_str());

    PendingRelation {
        decl: RelationDecl {
            name,
            kind,
            target: RelationTarget::Unresolved(String::new()),
            foreign_key,
            polymorphic,
        },
        to_tbl: def.to_tbl,
    }
}

fn relation_kind(def: &RelationDef) -> RelationKind {
    match (&def.rel_type, def.is_owner) {
        (RelationType::HasMany, _) => RelationKind::HasMany,
        (RelationType::HasOne, true) => RelationKind::HasOne,
        (RelationType::HasOne, false) => RelationKind::BelongsTo,
        #[allow(unreachable_patterns)]
        (other, _) => RelationKind::Other(format!("{other:?}")),
    }
}

fn identity_columns(identity: &Identity) -> String {
    let columns = match identity {
        Identity::Unary(a) => vec![a.to_string()],
        Identity::Binary(a, b) => vec![a.to_string(), b.to_string()],
        Identity::Ternary(a, b, c) => vec![a.to_string(), b.to_string(), c.to_string()],
        #[allow(unreachable_patterns)]
        _ => Vec::new(),
    };
    columns.join(",")
}

pub(crate) fn sql_type_name(column_type: &ColumnType) -> String {
    let name = match column_type {
        ColumnType::Char(_) => "char",
        ColumnType::String(_) => "varchar",
        ColumnType::Text => "text",
        ColumnType::Blob => "blob",
        ColumnType::TinyInteger => "tinyint",
        ColumnType::SmallInteger => "smallint",
        ColumnType::Integer => "integer",
        ColumnType::BigInteger => "bigint",
        ColumnType::TinyUnsigned => "tinyint unsigned",
        ColumnType::SmallUnsigned => "smallint unsigned",
        ColumnType::Unsigned => "integer unsigned",
        ColumnType::BigUnsigned => "bigint unsigned",
        ColumnType::Float => "real",
        ColumnType::Double => "double precision",
        ColumnType::Decimal(_) => "decimal",
        ColumnType::Money(_) => "money",
        ColumnType::DateTime => "datetime",
        ColumnType::Timestamp => "timestamp",
        ColumnType::TimestampWithTimeZone => "timestamp with time zone",
        ColumnType::Time => "time",
        ColumnType::Date => "date",
        ColumnType::Year => "year",
        ColumnType::Interval(_, _) => "interval",
        ColumnType::Binary(_) => "binary",
        ColumnType::VarBinary(_) => "varbinary",
        ColumnType::Bit(_) => "bit",
        ColumnType::VarBit(_) => "varbit",
        ColumnType::Boolean => "boolean",
        ColumnType::Json => "json",
        ColumnType::JsonBinary => "jsonb",
        ColumnType::Uuid => "uuid",
        ColumnType::Array(_) => "array",
        ColumnType::Vector(_) => "vector",
        ColumnType::Cidr => "cidr",
        ColumnType::Inet => "inet",
        ColumnType::MacAddr => "macaddr",
        ColumnType::LTree => "ltree",
        ColumnType::Enum { name, .. } => return name.to_string(),
        ColumnType::Custom(name) => return name.to_string(),
        _ => "unknown",
    };
    name.to_string()
}

fn json_from_value(value: QueryValue) -> JsonValue {
    match value {
        QueryValue::Bool(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::TinyInt(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::SmallInt(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::Int(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::BigInt(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::TinyUnsigned(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::SmallUnsigned(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::Unsigned(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::BigUnsigned(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::Float(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::Double(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
        QueryValue::String(v) => v
            .map(|s| JsonValue::String(s.to_string()))
            .unwrap_or(JsonValue::Null),
        QueryValue::Char(v) => v
            .map(|c| JsonValue::String(c.to_string()))
            .unwrap_or(JsonValue::Null),
        QueryValue::Json(v) => v.map(|json| *json).unwrap_or(JsonValue::Null),
        QueryValue::Uuid(v) => v
            .map(|uuid| JsonValue::String(uuid.to_string()))
            .unwrap_or(JsonValue::Null),
        QueryValue::ChronoDate(v) => v
            .map(|date| JsonValue::String(date.to_string()))
            .unwrap_or(JsonValue::Null),
        QueryValue::ChronoTime(v) => v
            .map(|time| JsonValue::String(time.to_string()))
            .unwrap_or(JsonValue::Null),
        QueryValue::ChronoDateTime(v) => v
            .map(|ts| JsonValue::String(ts.to_string()))
            .unwrap_or(JsonValue::Null),
        QueryValue::ChronoDateTimeWithTimeZone(v) => v
            .map(|ts| JsonValue::String(ts.to_rfc3339()))
            .unwrap_or(JsonValue::Null),
        other => {
            tracing::debug!(value = ?other, "default value has no JSON rendering");
            JsonValue::Null
        }
    }
}

fn entity_name_from_type_name(type_name: &str) -> String {
    // `crate::db::entities::todo_item::Entity` -> `TodoItem`
    let mut segments = type_name.rsplit("::");
    let last = segments.next().unwrap_or(type_name);
    let module = if last == "Entity" {
        segments.next().unwrap_or(last)
    } else {
        last
    };
    module.to_case(Case::Pascal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        introspect::{SchemaTables, discover_models},
        registry::RelationKind,
    };

    mod post {
        use sea_orm::entity::prelude::*;

        use crate::registry::EntityAnnotations;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "posts")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub title: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {
            #[sea_orm(has_many = "super::note::Entity")]
            Notes,
        }

        impl ActiveModelBehavior for ActiveModel {}

        impl EntityAnnotations for Entity {
            fn polymorphic_relations() -> &'static [&'static str] {
                &["notes"]
            }
        }
    }

    mod note {
        use sea_orm::entity::prelude::*;

        use crate::registry::EntityAnnotations;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "notes")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub notable_id: i32,
            pub body: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {
            #[sea_orm(
                belongs_to = "super::post::Entity",
                from = "Column::NotableId",
                to = "super::post::Column::Id"
            )]
            Notable,
        }

        impl Related<super::post::Entity> for Entity {
            fn to() -> RelationDef {
                Relation::Notable.def()
            }
        }

        impl ActiveModelBehavior for ActiveModel {}

        impl EntityAnnotations for Entity {
            fn polymorphic_relations() -> &'static [&'static str] {
                &["notable"]
            }
        }
    }

    mod timestamped {
        use sea_orm::entity::prelude::*;

        use crate::registry::EntityAnnotations;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "timestamped")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub created_at: DateTimeWithTimeZone,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}

        impl EntityAnnotations for Entity {
            fn is_abstract() -> bool {
                true
            }
        }
    }

    fn notes_catalog() -> ModelCatalog {
        OrmCatalogBuilder::new()
            .entity::<post::Entity>()
            .entity::<note::Entity>()
            .entity::<timestamped::Entity>()
            .build()
    }

    #[test]
    fn annotated_relations_are_marked_polymorphic() {
        let catalog = notes_catalog();

        let post = catalog.get("Post").expect("post should be registered");
        let notes = &post.relations()[0];
        assert_eq!(notes.name, "notes");
        assert_eq!(notes.kind, RelationKind::HasMany);
        assert_eq!(notes.foreign_key, "notable_id");
        assert!(notes.polymorphic);

        let note = catalog.get("Note").expect("note should be registered");
        let notable = &note.relations()[0];
        assert_eq!(notable.name, "notable");
        assert_eq!(notable.kind, RelationKind::BelongsTo);
        assert_eq!(notable.target, RelationTarget::Model("Post".to_string()));
        assert!(notable.polymorphic);
    }

    #[test]
    fn annotated_entities_can_be_abstract() {
        let catalog = notes_catalog();

        let timestamped = catalog
            .get("Timestamped")
            .expect("timestamped should be registered");
        assert!(timestamped.is_abstract());
        assert!(!catalog.get("Post").expect("post should be registered").is_abstract());

        let tables = SchemaTables::default();
        let discovered: Vec<&str> = discover_models(&catalog, tables.discovery())
            .into_iter()
            .map(|model| model.name())
            .collect();
        assert_eq!(discovered, vec!["Post", "Note"]);
    }

    #[test]
    fn entity_name_comes_from_module_path() {
        assert_eq!(
            entity_name_from_type_name("model_schema::db::entities::todo_item::Entity"),
            "TodoItem"
        );
        assert_eq!(entity_name_from_type_name("Ledger"), "Ledger");
    }

    #[test]
    fn column_types_render_as_sql_names() {
        assert_eq!(sql_type_name(&ColumnType::Text), "text");
        assert_eq!(sql_type_name(&ColumnType::BigInteger), "bigint");
        assert_eq!(
            sql_type_name(&ColumnType::TimestampWithTimeZone),
            "timestamp with time zone"
        );
        assert_eq!(sql_type_name(&ColumnType::JsonBinary), "jsonb");
        assert_eq!(sql_type_name(&ColumnType::Inet), "inet");
    }

    #[test]
    fn null_values_render_as_json_null() {
        assert_eq!(json_from_value(QueryValue::Int(None)), JsonValue::Null);
        assert_eq!(
            json_from_value(QueryValue::Bool(Some(false))),
            JsonValue::Bool(false)
        );
        assert_eq!(
            json_from_value(QueryValue::String(Some("draft".to_string()))),
            JsonValue::from("draft")
        );
    }
}
