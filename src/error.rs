use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unknown relation kind '{kind}' for {model}.{relation}")]
    UnknownRelationKind {
        model: String,
        relation: String,
        kind: String,
    },
}

impl SchemaError {
    pub fn unknown_relation_kind(
        model: impl Into<String>,
        relation: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self::UnknownRelationKind {
            model: model.into(),
            relation: relation.into(),
            kind: kind.into(),
        }
    }
}

pub type SchemaResult<T> = Result<T, SchemaError>;
