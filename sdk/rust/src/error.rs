//! Strongly typed error system for the chainql runtime.
//!
//! Every failure carries an [`ErrorCode`]. Remote failures additionally
//! carry an [`ErrorDetail`]: the raw error list for query errors, or the
//! decoded [`ExecError`] when the engine reports a failed subprocess.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::client::GraphQLError;

/// Discriminator value marking an execution error in `extensions._type`.
pub const EXEC_ERROR_TYPE: &str = "EXEC_ERROR";

/// What went wrong, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // Transport errors
    NetworkError,
    Timeout,
    ConnectionFailed,
    HttpError,
    InvalidUrl,
    InvalidResponse,

    // Programming errors
    StructuralError,

    // Remote errors
    QueryError,
    ExecError,
    NoData,

    // Encoding errors
    SerializeError,
    DeserializeError,
    UnexpectedShape,

    // Configuration errors
    ConfigError,

    InternalError,
}

impl ErrorCode {
    /// Wire form, e.g. `EXEC_ERROR`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::ConnectionFailed => "CONNECTION_FAILED",
            Self::HttpError => "HTTP_ERROR",
            Self::InvalidUrl => "INVALID_URL",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::StructuralError => "STRUCTURAL_ERROR",
            Self::QueryError => "QUERY_ERROR",
            Self::ExecError => "EXEC_ERROR",
            Self::NoData => "NO_DATA",
            Self::SerializeError => "SERIALIZE_ERROR",
            Self::DeserializeError => "DESERIALIZE_ERROR",
            Self::UnexpectedShape => "UNEXPECTED_SHAPE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Returns true for transient transport failures.
    ///
    /// Nothing in this crate retries; this only informs callers that
    /// implement their own policy.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::Timeout)
    }

    /// Returns true if the error was reported by the remote engine.
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::QueryError | Self::ExecError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A remote command that exited unsuccessfully inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecError {
    pub message: String,
    pub path: Vec<serde_json::Value>,
    pub exit_code: i32,
    pub cmd: Vec<String>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecError {
    /// Decodes an execution error from a raw error entry.
    ///
    /// Returns `None` unless `extensions._type` is `EXEC_ERROR`.
    pub fn from_graphql_error(error: &GraphQLError) -> Option<Self> {
        let ext = error.extensions.as_ref()?;
        if ext.get("_type").and_then(|t| t.as_str()) != Some(EXEC_ERROR_TYPE) {
            return None;
        }

        let exit_code = match ext.get("exitCode") {
            Some(serde_json::Value::Number(n)) => n
                .as_i64()
                .and_then(|code| i32::try_from(code).ok())
                .unwrap_or(-1),
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(-1),
            _ => -1,
        };
        let cmd = ext
            .get("cmd")
            .and_then(|c| c.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        let text = |key: &str| {
            ext.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Some(Self {
            message: error.message.clone(),
            path: error.path.clone().unwrap_or_default(),
            exit_code,
            cmd,
            stdout: text("stdout"),
            stderr: text("stderr"),
        })
    }
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (exit code {}, cmd {:?})",
            self.message, self.exit_code, self.cmd
        )
    }
}

/// Structured payload attached to remote errors.
#[derive(Debug, Clone)]
pub enum ErrorDetail {
    /// The complete raw error list of a failed query.
    Query(Vec<GraphQLError>),
    /// A failed command inside the engine.
    Exec(ExecError),
}

/// Error returned by every fallible runtime operation.
#[derive(Error, Debug, Clone)]
#[error("[{code}] {message}")]
pub struct SdkError {
    pub code: ErrorCode,
    pub message: String,
    /// Cause, e.g. the probe failure behind `ConnectionFailed`.
    #[source]
    pub source: Option<Box<SdkError>>,
    /// Transport details such as HTTP status and a truncated body.
    pub extensions: Option<HashMap<String, serde_json::Value>>,
    /// Remote error payload.
    pub detail: Option<ErrorDetail>,
}

impl SdkError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
            extensions: None,
            detail: None,
        }
    }

    /// Records the underlying cause.
    pub fn with_source(mut self, source: SdkError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Attaches a JSON-encodable detail. Values that fail to encode are skipped.
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let extensions = self.extensions.get_or_insert_with(HashMap::new);
        if let Ok(v) = serde_json::to_value(value) {
            extensions.insert(key.into(), v);
        }
        self
    }

    /// Attaches a remote error payload.
    pub fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    pub fn timeout() -> Self {
        Self::new(ErrorCode::Timeout, "request timed out")
    }

    /// Session could not be established.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConnectionFailed, message)
    }

    /// The chain was built wrongly, e.g. extended past its leaves.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StructuralError, message)
    }

    pub fn serialize(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializeError, message)
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeserializeError, message)
    }

    /// The response did not follow the selected path.
    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnexpectedShape, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// See [`ErrorCode::is_retryable`].
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// The execution error payload, if the engine reported a failed command.
    pub fn exec_error(&self) -> Option<&ExecError> {
        match &self.detail {
            Some(ErrorDetail::Exec(exec)) => Some(exec),
            _ => None,
        }
    }

    /// The raw remote error list, for plain query errors.
    pub fn query_errors(&self) -> Option<&[GraphQLError]> {
        match &self.detail {
            Some(ErrorDetail::Query(errors)) => Some(errors),
            _ => None,
        }
    }
}

impl Serialize for SdkError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SdkError", 4)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("message", &self.message)?;
        if let Some(ext) = &self.extensions {
            state.serialize_field("extensions", ext)?;
        }
        match &self.detail {
            Some(ErrorDetail::Exec(exec)) => state.serialize_field("exec", exec)?,
            Some(ErrorDetail::Query(errors)) => state.serialize_field("errors", errors)?,
            None => {}
        }
        state.end()
    }
}

/// Type alias for SDK results.
pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Classifies a non-empty remote error list.
///
/// The first entry tagged `EXEC_ERROR` wins and becomes an
/// [`ErrorCode::ExecError`]; otherwise the whole list is surfaced as an
/// [`ErrorCode::QueryError`].
pub fn classify(errors: Vec<GraphQLError>) -> SdkError {
    if let Some(exec) = errors.iter().find_map(ExecError::from_graphql_error) {
        return SdkError::new(ErrorCode::ExecError, exec.to_string())
            .with_detail(ErrorDetail::Exec(exec));
    }

    let message = match errors.as_slice() {
        [] => "query failed without error details".to_string(),
        [single] => single.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    };
    SdkError::new(ErrorCode::QueryError, message).with_detail(ErrorDetail::Query(errors))
}

/// Converts foreign errors into [`SdkError`] with a chosen code.
pub trait IntoSdkError {
    fn into_sdk_error(self, code: ErrorCode) -> SdkError;
}

impl<E: std::error::Error> IntoSdkError for E {
    fn into_sdk_error(self, code: ErrorCode) -> SdkError {
        SdkError::new(code, self.to_string())
    }
}

/// Maps foreign `Result` errors into [`SdkError`].
pub trait ResultExt<T> {
    /// Keeps the foreign error's text as the message.
    fn map_sdk_err(self, code: ErrorCode) -> SdkResult<T>;

    /// Uses `message: <foreign error>` as the message.
    fn map_sdk_err_with(self, code: ErrorCode, message: impl Into<String>) -> SdkResult<T>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn map_sdk_err(self, code: ErrorCode) -> SdkResult<T> {
        self.map_err(|e| e.into_sdk_error(code))
    }

    fn map_sdk_err_with(self, code: ErrorCode, message: impl Into<String>) -> SdkResult<T> {
        self.map_err(|e| SdkError::new(code, format!("{}: {e}", message.into())))
    }
}
