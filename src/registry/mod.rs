//! Metadata-provider interface the host application implements.
//!
//! The introspection pipeline never inspects concrete model types. Everything it
//! knows about a model comes through [`ModelRegistry`] and [`ModelSource`].

pub mod catalog;
pub mod orm;

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

pub use catalog::{ModelCatalog, ModelEntry};
pub use orm::{EntityAnnotations, OrmCatalogBuilder, entry_for_entity};

/// Attribute values read from a transient, unsaved model instance.
pub type Attributes = BTreeMap<String, Value>;

/// Bound options as declared on a length or numeric rule.
pub type BoundOptions = Map<String, Value>;

/// Flag bit for case-insensitive `Format` patterns.
pub const PATTERN_IGNORE_CASE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDecl {
    pub name: String,
    pub sql_type: String,
}

impl ColumnDecl {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationRule {
    Inclusion { values: Vec<Value> },
    Presence,
    Format { pattern: String, flags: u32 },
    Length(BoundOptions),
    Numericality(BoundOptions),
    /// A rule kind the host declares but the schema has no record for.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationKind {
    HasMany,
    HasManyThrough,
    HasOne,
    HasOneThrough,
    BelongsTo,
    /// Any relation implementation the host cannot map onto the kinds above.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationTarget {
    /// Target named by model (class) name.
    Model(String),
    /// The host could not name a target at all.
    Unresolved(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDecl {
    pub name: String,
    pub kind: RelationKind,
    pub target: RelationTarget,
    pub foreign_key: String,
    pub polymorphic: bool,
}

impl RelationDecl {
    pub fn new(
        name: impl Into<String>,
        kind: RelationKind,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            target: RelationTarget::Model(target.into()),
            foreign_key: foreign_key.into(),
            polymorphic: false,
        }
    }

    pub fn polymorphic(mut self) -> Self {
        self.polymorphic = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no model named '{0}' is registered")]
    UnknownModel(String),
    #[error("relation target could not be resolved: {0}")]
    Unresolved(String),
}

pub trait ModelSource: Send + Sync {
    /// Fully qualified model name, e.g. `Blog::Post`.
    fn name(&self) -> &str;
    fn is_abstract(&self) -> bool;
    fn table_name(&self) -> &str;
    fn primary_key(&self) -> &str;
    /// Storage columns in declared order.
    fn columns(&self) -> &[ColumnDecl];
    fn validations(&self, column: &str) -> Vec<ValidationRule>;
    /// Relations in declared order.
    fn relations(&self) -> &[RelationDecl];
    /// Builds a throwaway unsaved instance and returns its attributes. Must not
    /// touch persistent storage.
    fn instantiate(&self) -> Attributes;
}

pub trait ModelRegistry {
    /// Direct descendants of the ORM base model.
    fn base_models(&self) -> Vec<&dyn ModelSource>;
    fn subclasses(&self, model: &dyn ModelSource) -> Vec<&dyn ModelSource>;
    /// Whether the file-attachment subsystem is loaded in the host.
    fn has_attachments(&self) -> bool;
    fn resolve(&self, target: &RelationTarget) -> Result<&dyn ModelSource, ResolveError>;
}
