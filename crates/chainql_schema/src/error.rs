//! Schema parsing errors.

use thiserror::Error;

/// A fatal problem with an introspection document.
///
/// There is no degraded mode: any of these aborts parsing.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("invalid introspection JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read introspection document: {0}")]
    Io(#[from] std::io::Error),

    #[error("introspection document has no `__schema` entry")]
    MissingSchema,

    #[error("introspection schema has no `types` list")]
    MissingTypes,

    #[error("{context}: missing `{field}`")]
    MissingField {
        context: String,
        field: &'static str,
    },

    #[error("{context}: unknown type kind `{kind}`")]
    UnknownKind { context: String, kind: String },

    #[error("{context}: `{kind}` wrapper without `ofType`")]
    MissingInner { context: String, kind: &'static str },

    #[error("{context}: NON_NULL wraps another NON_NULL")]
    NestedNonNull { context: String },

    #[error("duplicate type `{0}`")]
    DuplicateType(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
