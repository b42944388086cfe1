//! Generation errors.

use chainql_schema::TypeKind;
use thiserror::Error;

/// Reasons generation can fail.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("type `{name}` has unsupported kind {kind}")]
    UnsupportedKind { name: String, kind: TypeKind },

    #[error("{context} references unknown type `{name}`")]
    UnknownType { context: String, name: String },

    #[error("{context}: {message}")]
    Unsupported { context: String, message: String },
}

impl CodegenError {
    pub(crate) fn unsupported(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unsupported {
            context: context.into(),
            message: message.into(),
        }
    }
}

pub type CodegenResult<T> = std::result::Result<T, CodegenError>;
