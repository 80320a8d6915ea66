use tracing::debug;

use crate::{
    registry::ValidationRule,
    schema::{Constraint, FormatConstraint},
};

/// One record per recognized rule, in declaration order. Rule kinds without a
/// canonical record are dropped.
pub fn normalize_validators(rules: &[ValidationRule]) -> Vec<Constraint> {
    rules.iter().filter_map(normalize_rule).collect()
}

pub fn normalize_rule(rule: &ValidationRule) -> Option<Constraint> {
    match rule {
        ValidationRule::Inclusion { values } => Some(Constraint::Includes(values.clone())),
        ValidationRule::Presence => Some(Constraint::Required(true)),
        ValidationRule::Format { pattern, flags } => Some(Constraint::Format(FormatConstraint {
            source: pattern.clone(),
            options: *flags,
        })),
        ValidationRule::Length(options) => Some(Constraint::Length(options.clone())),
        ValidationRule::Numericality(options) => Some(Constraint::Numeric(options.clone())),
        ValidationRule::Other(kind) => {
            debug!(kind = kind.as_str(), "validation rule has no canonical record");
            None
        }
    }
}
