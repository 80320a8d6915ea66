use std::{fmt, sync::Arc};

use serde_json::Value;

use super::{
    Attributes, ColumnDecl, ModelRegistry, ModelSource, RelationDecl, RelationTarget,
    ResolveError, ValidationRule,
};

type InstanceFactory = Arc<dyn Fn() -> Attributes + Send + Sync>;

#[derive(Clone)]
pub struct ModelEntry {
    name: String,
    parent: Option<String>,
    is_abstract: bool,
    table_name: String,
    primary_key: String,
    columns: Vec<ColumnDecl>,
    validations: Vec<(String, ValidationRule)>,
    relations: Vec<RelationDecl>,
    defaults: Attributes,
    factory: Option<InstanceFactory>,
}

impl ModelEntry {
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            is_abstract: false,
            table_name: table_name.into(),
            primary_key: "id".to_string(),
            columns: Vec::new(),
            validations: Vec::new(),
            relations: Vec::new(),
            defaults: Attributes::new(),
            factory: None,
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn abstract_model(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    pub fn column(mut self, name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        self.columns.push(ColumnDecl::new(name, sql_type));
        self
    }

    pub fn validates(mut self, column: impl Into<String>, rule: ValidationRule) -> Self {
        self.validations.push((column.into(), rule));
        self
    }

    pub fn relation(mut self, relation: RelationDecl) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn default_value(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(column.into(), value.into());
        self
    }

    /// Replaces the static defaults with a factory run on every instantiation.
    pub fn instantiate_with<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Attributes + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }
}

impl fmt::Debug for ModelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelEntry")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("is_abstract", &self.is_abstract)
            .field("table_name", &self.table_name)
            .field("primary_key", &self.primary_key)
            .field("columns", &self.columns)
            .field("relations", &self.relations)
            .finish_non_exhaustive()
    }
}

impl ModelSource for ModelEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn primary_key(&self) -> &str {
        &self.primary_key
    }

    fn columns(&self) -> &[ColumnDecl] {
        &self.columns
    }

    fn validations(&self, column: &str) -> Vec<ValidationRule> {
        self.validations
            .iter()
            .filter(|(name, _)| name == column)
            .map(|(_, rule)| rule.clone())
            .collect()
    }

    fn relations(&self) -> &[RelationDecl] {
        &self.relations
    }

    fn instantiate(&self) -> Attributes {
        match &self.factory {
            Some(factory) => factory(),
            None => self.defaults.clone(),
        }
    }
}

/// In-memory registry. Models are enumerated in registration order.
#[derive(Debug, Default, Clone)]
pub struct ModelCatalog {
    entries: Vec<ModelEntry>,
    attachments: bool,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attachments(mut self, enabled: bool) -> Self {
        self.attachments = enabled;
        self
    }

    pub fn with_model(mut self, entry: ModelEntry) -> Self {
        self.register(entry);
        self
    }

    pub fn register(&mut self, entry: ModelEntry) {
        self.entries.push(entry);
    }

    pub fn get(&self, name: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

impl ModelRegistry for ModelCatalog {
    /// Entries without a parent, plus entries whose parent is not registered
    /// (or is the entry itself), so every entry is reachable from some root.
    fn base_models(&self) -> Vec<&dyn ModelSource> {
        self.entries
            .iter()
            .filter(|entry| match entry.parent.as_deref() {
                None => true,
                Some(parent) => parent == entry.name || self.get(parent).is_none(),
            })
            .map(|entry| entry as &dyn ModelSource)
            .collect()
    }

    fn subclasses(&self, model: &dyn ModelSource) -> Vec<&dyn ModelSource> {
        self.entries
            .iter()
            .filter(|entry| entry.parent.as_deref() == Some(model.name()))
            .map(|entry| entry as &dyn ModelSource)
            .collect()
    }

    fn has_attachments(&self) -> bool {
        self.attachments
    }

    fn resolve(&self, target: &RelationTarget) -> Result<&dyn ModelSource, ResolveError> {
        match target {
            RelationTarget::Model(name) => self
                .get(name)
                .map(|entry| entry as &dyn ModelSource)
                .ok_or_else(|| ResolveError::UnknownModel(name.clone())),
            RelationTarget::Unresolved(description) => {
                Err(ResolveError::Unresolved(description.clone()))
            }
        }
    }
}
