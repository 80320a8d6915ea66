pub const DEFAULT_RUST_LOG: &str = "info";
pub const DEFAULT_INTERNAL_NAMESPACE: &str = "model_schema";
pub const DEFAULT_MIGRATION_TABLE: &str = "seaql_migrations";
pub const DEFAULT_ATTACHMENT_MODELS: &[&str] = &["attachments::Blob", "attachments::VariantRecord"];
pub const DEFAULT_PRETTY_OUTPUT: bool = true;

pub const READ_ONLY_COLUMNS: &[&str] = &["id", "created_at", "updated_at", "deleted_at"];

pub const LIST_KEYS: &[&str] = &[
    "introspection.attachment_models",
    "introspection.hidden_columns",
    "introspection.write_only_columns",
];
