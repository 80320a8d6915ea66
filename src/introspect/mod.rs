//! The introspection pipeline: discover models, extract columns and
//! associations, assemble one schema record per model.

pub mod assemble;
pub mod associations;
pub mod columns;
pub mod discover;
pub mod display;
pub mod tables;
pub mod validators;

use tracing::info;

pub use assemble::assemble_model;
pub use associations::extract_associations;
pub use columns::extract_columns;
pub use discover::discover_models;
pub use display::{DisplayColumnResolver, NameLikeColumn};
pub use tables::{DiscoveryRules, SchemaTables};
pub use validators::normalize_validators;

use crate::{
    error::SchemaResult,
    registry::{ModelRegistry, ModelSource},
    schema::ModelSchema,
};

/// Runs the pipeline against a registry. Holds only shared references, so one
/// value can serve any number of independent runs.
pub struct Introspector<'a> {
    registry: &'a dyn ModelRegistry,
    tables: &'a SchemaTables,
    display: &'a dyn DisplayColumnResolver,
}

impl<'a> Introspector<'a> {
    pub fn new(registry: &'a dyn ModelRegistry, tables: &'a SchemaTables) -> Self {
        Self {
            registry,
            tables,
            display: &NameLikeColumn,
        }
    }

    pub fn with_display_resolver(mut self, display: &'a dyn DisplayColumnResolver) -> Self {
        self.display = display;
        self
    }

    pub fn discover(&self) -> Vec<&'a dyn ModelSource> {
        discover_models(self.registry, self.tables.discovery())
    }

    pub fn model_schema(&self, model: &dyn ModelSource) -> SchemaResult<ModelSchema> {
        let columns = extract_columns(model, self.tables);
        let associations = extract_associations(model, self.registry, self.tables.discovery())?;
        let display_column = self.display.display_column(model);
        Ok(assemble_model(model, columns, associations, display_column))
    }

    pub fn build(&self) -> SchemaResult<Vec<ModelSchema>> {
        let schemas = self
            .discover()
            .into_iter()
            .map(|model| self.model_schema(model))
            .collect::<SchemaResult<Vec<_>>>()?;
        info!(models = schemas.len(), "schema built");
        Ok(schemas)
    }
}

pub fn build_schema(
    registry: &dyn ModelRegistry,
    tables: &SchemaTables,
) -> SchemaResult<Vec<ModelSchema>> {
    Introspector::new(registry, tables).build()
}
