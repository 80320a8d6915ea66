use std::collections::HashSet;

use tracing::debug;

use super::tables::DiscoveryRules;
use crate::registry::{ModelRegistry, ModelSource};

/// Concrete, user-facing models: the full descendant closure of the ORM base
/// model, deduplicated, in registry enumeration order (pre-order).
pub fn discover_models<'r>(
    registry: &'r dyn ModelRegistry,
    rules: &DiscoveryRules,
) -> Vec<&'r dyn ModelSource> {
    let mut seen = HashSet::new();
    let mut descendants = Vec::new();
    for model in registry.base_models() {
        collect_descendants(registry, model, &mut seen, &mut descendants);
    }

    let attachments = registry.has_attachments();
    descendants
        .into_iter()
        .filter(|model| match exclusion_reason(*model, rules, attachments) {
            Some(reason) => {
                debug!(model = model.name(), reason, "model excluded from discovery");
                false
            }
            None => true,
        })
        .collect()
}

fn collect_descendants<'r>(
    registry: &'r dyn ModelRegistry,
    model: &'r dyn ModelSource,
    seen: &mut HashSet<&'r str>,
    out: &mut Vec<&'r dyn ModelSource>,
) {
    if !seen.insert(model.name()) {
        return;
    }
    out.push(model);
    for child in registry.subclasses(model) {
        collect_descendants(registry, child, seen, out);
    }
}

fn exclusion_reason(
    model: &dyn ModelSource,
    rules: &DiscoveryRules,
    attachments: bool,
) -> Option<&'static str> {
    if model.is_abstract() {
        return Some("abstract");
    }
    if rules.is_internal(model.name()) {
        return Some("internal bookkeeping");
    }
    if model.table_name() == rules.migration_table {
        return Some("migration history");
    }
    if attachments && rules.is_attachment_internal(model.name()) {
        return Some("attachment internals");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        introspect::tables::SchemaTables,
        registry::{ModelCatalog, ModelEntry},
    };

    fn names(models: Vec<&dyn ModelSource>) -> Vec<&str> {
        models.into_iter().map(|model| model.name()).collect()
    }

    #[test]
    fn includes_grandchildren_of_abstract_bases() {
        let catalog = ModelCatalog::new()
            .with_model(ModelEntry::new("ApplicationRecord", "").abstract_model())
            .with_model(ModelEntry::new("Vehicle", "vehicles").parent("ApplicationRecord"))
            .with_model(ModelEntry::new("Car", "vehicles").parent("Vehicle"))
            .with_model(ModelEntry::new("SportsCar", "vehicles").parent("Car"));
        let tables = SchemaTables::default();

        let models = discover_models(&catalog, tables.discovery());

        assert_eq!(names(models), vec!["Vehicle", "Car", "SportsCar"]);
    }

    #[test]
    fn excludes_bookkeeping_and_migration_models() {
        let catalog = ModelCatalog::new()
            .with_model(ModelEntry::new("model_schema::Preference", "schema_preferences"))
            .with_model(ModelEntry::new("SeaqlMigrations", "seaql_migrations"))
            .with_model(ModelEntry::new("Invoice", "invoices"));
        let tables = SchemaTables::default();

        let models = discover_models(&catalog, tables.discovery());

        assert_eq!(names(models), vec!["Invoice"]);
    }

    #[test]
    fn attachment_internals_only_excluded_when_subsystem_present() {
        let entries = || {
            ModelCatalog::new()
                .with_model(ModelEntry::new("attachments::Blob", "attachment_blobs"))
                .with_model(ModelEntry::new(
                    "attachments::VariantRecord",
                    "attachment_variant_records",
                ))
                .with_model(ModelEntry::new("attachments::Attachment", "attachments"))
        };
        let tables = SchemaTables::default();

        let with_subsystem = entries().with_attachments(true);
        let without_subsystem = entries();

        assert_eq!(
            names(discover_models(&with_subsystem, tables.discovery())),
            vec!["attachments::Attachment"]
        );
        assert_eq!(
            discover_models(&without_subsystem, tables.discovery()).len(),
            3
        );
    }

    #[test]
    fn models_reachable_twice_are_listed_once() {
        // A registry whose enumeration repeats a model must not duplicate it.
        struct Repeating(ModelCatalog);

        impl ModelRegistry for Repeating {
            fn base_models(&self) -> Vec<&dyn ModelSource> {
                let mut models = self.0.base_models();
                models.extend(self.0.base_models());
                models
            }

            fn subclasses(&self, model: &dyn ModelSource) -> Vec<&dyn ModelSource> {
                self.0.subclasses(model)
            }

            fn has_attachments(&self) -> bool {
                false
            }

            fn resolve(
                &self,
                target: &crate::registry::RelationTarget,
            ) -> Result<&dyn ModelSource, crate::registry::ResolveError> {
                self.0.resolve(target)
            }
        }

        let registry = Repeating(
            ModelCatalog::new()
                .with_model(ModelEntry::new("Account", "accounts"))
                .with_model(ModelEntry::new("Business", "accounts").parent("Account")),
        );
        let tables = SchemaTables::default();

        let models = discover_models(&registry, tables.discovery());

        assert_eq!(names(models), vec!["Account", "Business"]);
    }
}
