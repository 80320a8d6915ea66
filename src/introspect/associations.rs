use tracing::debug;

use super::tables::DiscoveryRules;
use crate::{
    error::{SchemaError, SchemaResult},
    naming,
    registry::{ModelRegistry, ModelSource, RelationDecl, RelationKind},
    schema::{AssociationSchema, AssociationType},
};

/// Association records in declared order. Relations that cannot be resolved
/// safely are skipped; an unclassifiable relation kind aborts with an error.
pub fn extract_associations(
    model: &dyn ModelSource,
    registry: &dyn ModelRegistry,
    rules: &DiscoveryRules,
) -> SchemaResult<Vec<AssociationSchema>> {
    let mut associations = Vec::new();
    for relation in model.relations() {
        if relation.polymorphic && relation.kind == RelationKind::BelongsTo {
            debug!(
                model = model.name(),
                relation = relation.name.as_str(),
                reason = "polymorphic belongs_to",
                "association skipped"
            );
            continue;
        }

        let target = match registry.resolve(&relation.target) {
            Ok(target) => target,
            Err(err) => {
                debug!(
                    model = model.name(),
                    relation = relation.name.as_str(),
                    reason = %err,
                    "association skipped"
                );
                continue;
            }
        };

        if registry.has_attachments() && rules.is_attachment_internal(target.name()) {
            debug!(
                model = model.name(),
                relation = relation.name.as_str(),
                reason = "attachment internal target",
                "association skipped"
            );
            continue;
        }

        let association_type = classify(model, relation)?;
        associations.push(AssociationSchema {
            name: relation.name.clone(),
            display_name: naming::humanize(&relation.name),
            slug: naming::slugify(&relation.name),
            model_name: naming::model_name(target.name()),
            model_slug: naming::slugify(target.name()),
            association_type,
            foreign_key: relation.foreign_key.clone(),
            polymorphic: relation.polymorphic,
            visible: true,
        });
    }
    Ok(associations)
}

pub fn classify(model: &dyn ModelSource, relation: &RelationDecl) -> SchemaResult<AssociationType> {
    match &relation.kind {
        RelationKind::HasMany | RelationKind::HasManyThrough => Ok(AssociationType::HasMany),
        RelationKind::HasOne | RelationKind::HasOneThrough => Ok(AssociationType::HasOne),
        RelationKind::BelongsTo => Ok(AssociationType::BelongsTo),
        RelationKind::Other(kind) => Err(SchemaError::unknown_relation_kind(
            model.name(),
            relation.name.as_str(),
            kind.as_str(),
        )),
    }
}
