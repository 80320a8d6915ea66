use crate::registry::ModelSource;

/// Column names preferred for identifying a record, best first.
pub const DISPLAY_COLUMN_CANDIDATES: &[&str] = &[
    "name",
    "title",
    "label",
    "display_name",
    "full_name",
    "email",
    "slug",
];

pub trait DisplayColumnResolver {
    fn display_column(&self, model: &dyn ModelSource) -> String;
}

impl<F> DisplayColumnResolver for F
where
    F: Fn(&dyn ModelSource) -> String,
{
    fn display_column(&self, model: &dyn ModelSource) -> String {
        self(model)
    }
}

/// Picks a name/title-like column, falling back to the primary key.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameLikeColumn;

impl DisplayColumnResolver for NameLikeColumn {
    fn display_column(&self, model: &dyn ModelSource) -> String {
        DISPLAY_COLUMN_CANDIDATES
            .iter()
            .find(|candidate| {
                model
                    .columns()
                    .iter()
                    .any(|column| column.name == **candidate)
            })
            .map(|candidate| candidate.to_string())
            .unwrap_or_else(|| model.primary_key().to_string())
    }
}
