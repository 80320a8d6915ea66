pub mod entities;

use crate::registry::{ModelCatalog, OrmCatalogBuilder};

use self::entities::{refresh_token, seaql_migration, todo_item, todo_list, user};

/// Registry over the bundled sea-orm entities, in declaration order.
pub fn sample_catalog() -> ModelCatalog {
    OrmCatalogBuilder::new()
        .entity::<user::Entity>()
        .entity::<refresh_token::Entity>()
        .entity::<todo_list::Entity>()
        .entity::<todo_item::Entity>()
        .entity::<seaql_migration::Entity>()
        .build()
}
