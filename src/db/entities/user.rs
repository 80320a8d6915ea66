use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::registry::{EntityAnnotations, PATTERN_IGNORE_CASE, ValidationRule};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub last_login_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::refresh_token::Entity")]
    RefreshTokens,
    #[sea_orm(has_many = "super::todo_list::Entity")]
    TodoLists,
}

impl Related<super::refresh_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RefreshTokens.def()
    }
}

impl Related<super::todo_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TodoLists.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            role: Set("user".to_owned()),
            ..ActiveModelTrait::default()
        }
    }
}

impl EntityAnnotations for Entity {
    fn validations() -> Vec<(&'static str, ValidationRule)> {
        vec![
            ("email", ValidationRule::Presence),
            (
                "email",
                ValidationRule::Format {
                    pattern: "^[^@\\s]+@[^@\\s]+$".to_string(),
                    flags: PATTERN_IGNORE_CASE,
                },
            ),
            ("email", ValidationRule::Other("uniqueness".to_string())),
            (
                "role",
                ValidationRule::Inclusion {
                    values: vec!["user".into(), "admin".into()],
                },
            ),
        ]
    }
}
