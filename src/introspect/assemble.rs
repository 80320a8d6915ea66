use crate::{
    naming,
    registry::ModelSource,
    schema::{ActionSchema, AssociationSchema, ColumnSchema, ModelSchema, TabSchema},
};

pub const DEFAULT_ACTIONS: &[&str] = &["create", "edit", "remove"];
pub const DEFAULT_TABS: &[&str] = &["summary"];

pub fn default_actions() -> Vec<ActionSchema> {
    DEFAULT_ACTIONS
        .iter()
        .map(|name| ActionSchema::default_action(*name))
        .collect()
}

pub fn default_tabs() -> Vec<TabSchema> {
    DEFAULT_TABS
        .iter()
        .map(|name| TabSchema::default_tab(*name))
        .collect()
}

pub fn assemble_model(
    model: &dyn ModelSource,
    columns: Vec<ColumnSchema>,
    associations: Vec<AssociationSchema>,
    display_column: String,
) -> ModelSchema {
    ModelSchema {
        name: naming::model_name(model.name()),
        slug: naming::slugify(model.name()),
        table_name: model.table_name().to_string(),
        primary_key: model.primary_key().to_string(),
        display_name: naming::model_display_name(model.name()),
        display_column,
        columns,
        associations,
        actions: default_actions(),
        tabs: default_tabs(),
        visible: true,
    }
}
