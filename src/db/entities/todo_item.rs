use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde_json::json;

use crate::registry::{BoundOptions, EntityAnnotations, ValidationRule};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todo_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub list_id: Uuid,
    pub description: String,
    pub done: bool,
    pub priority: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::todo_list::Entity",
        from = "Column::ListId",
        to = "super::todo_list::Column::Id",
        on_delete = "Cascade"
    )]
    List,
}

impl Related<super::todo_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::List.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            done: Set(false),
            priority: Set(0),
            ..ActiveModelTrait::default()
        }
    }
}

impl EntityAnnotations for Entity {
    fn validations() -> Vec<(&'static str, ValidationRule)> {
        let mut length = BoundOptions::new();
        length.insert("maximum".to_string(), json!(500));
        let mut priority = BoundOptions::new();
        priority.insert("greater_than_or_equal_to".to_string(), json!(0));
        priority.insert("less_than_or_equal_to".to_string(), json!(5));

        vec![
            ("description", ValidationRule::Presence),
            ("description", ValidationRule::Length(length)),
            ("priority", ValidationRule::Numericality(priority)),
        ]
    }
}
