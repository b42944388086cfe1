//! Connection to the engine.
//!
//! A [`Connection`] is the single handle every query builder carries. It
//! owns one [`Transport`] and turns each terminal execution into exactly one
//! request:
//! - `ClientConfig`: endpoint, timeouts, headers and credential
//! - `Transport`: the request/response seam (HTTP in production, mocks in tests)
//! - `Connection`: document in, classified `data` out
//!
//! # Example
//!
//! ```ignore
//! use chainql_sdk::{ClientConfig, Connection};
//!
//! let connection = Connection::connect(ClientConfig::from_env()?).await?;
//! let data = connection.send("query {version}").await?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{classify, ErrorCode, ResultExt, SdkError, SdkResult};
use crate::http::HttpTransport;
use crate::introspection::INTROSPECTION_QUERY;

/// Environment variable holding the local session port.
pub const SESSION_PORT_ENV: &str = "CHAINQL_SESSION_PORT";
/// Environment variable holding the session token.
pub const SESSION_TOKEN_ENV: &str = "CHAINQL_SESSION_TOKEN";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "CHAINQL_TIMEOUT_SECS";

/// Document used to check that an endpoint answers.
const PROBE_QUERY: &str = "query {__typename}";

/// Credential attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// `Authorization: Bearer <token>`.
    Bearer(String),
    /// HTTP basic auth.
    Basic {
        username: String,
        password: Option<String>,
    },
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Self::Basic { .. } => f.write_str("Basic(<redacted>)"),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// URL of the GraphQL endpoint.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Time allowed for the initial probe in [`Connection::connect`].
    pub connect_timeout: Duration,
    /// Default headers.
    pub headers: HashMap<String, String>,
    pub credential: Option<Credential>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            headers: HashMap::new(),
            credential: None,
        }
    }
}

impl ClientConfig {
    /// Creates a new config with a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Builds a config for a locally running engine session.
    ///
    /// Reads `CHAINQL_SESSION_PORT` (required), `CHAINQL_SESSION_TOKEN` and
    /// `CHAINQL_TIMEOUT_SECS`.
    pub fn from_env() -> SdkResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SdkResult<Self> {
        let port = lookup(SESSION_PORT_ENV)
            .ok_or_else(|| SdkError::config(format!("{SESSION_PORT_ENV} is not set")))?;
        let port: u16 = port.trim().parse().map_sdk_err_with(
            ErrorCode::ConfigError,
            format!("{SESSION_PORT_ENV} is not a valid port ({port})"),
        )?;

        let mut config = Self::new(format!("http://127.0.0.1:{port}/query"));

        if let Some(token) = lookup(SESSION_TOKEN_ENV).filter(|t| !t.is_empty()) {
            config = config.basic_auth(token, None::<String>);
        }

        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_sdk_err_with(
                ErrorCode::ConfigError,
                format!("{TIMEOUT_ENV} is not a number of seconds ({secs})"),
            )?;
            config = config.timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect probe timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Adds a default header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Uses a bearer token.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(Credential::Bearer(token.into()));
        self
    }

    /// Uses HTTP basic auth.
    pub fn basic_auth(
        mut self,
        username: impl Into<String>,
        password: Option<impl Into<String>>,
    ) -> Self {
        self.credential = Some(Credential::Basic {
            username: username.into(),
            password: password.map(Into::into),
        });
        self
    }
}

/// A GraphQL request.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }
}

/// A GraphQL response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

/// A GraphQL error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

/// Sends one request and returns the decoded envelope.
///
/// Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> SdkResult<Response>;
}

/// Handle to the engine shared by every builder.
#[derive(Clone)]
pub struct Connection {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

impl Connection {
    /// Wraps an existing transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Opens an HTTP connection and checks that the endpoint answers.
    ///
    /// The probe must succeed within `connect_timeout`. Failure is
    /// reported as [`ErrorCode::ConnectionFailed`] and is not retried.
    pub async fn connect(config: ClientConfig) -> SdkResult<Self> {
        let connect_timeout = config.connect_timeout;
        let url = config.url.clone();
        let transport = HttpTransport::new(config)?;
        let connection = Self::new(Arc::new(transport));

        match tokio::time::timeout(connect_timeout, connection.send(PROBE_QUERY)).await {
            Ok(Ok(_)) => {
                debug!(%url, "connected");
                Ok(connection)
            }
            Ok(Err(e)) => Err(SdkError::connection(format!("cannot reach {url}")).with_source(e)),
            Err(_) => Err(SdkError::connection(format!(
                "no answer from {url} within {connect_timeout:?}"
            ))),
        }
    }

    /// Sends a raw request without interpreting the envelope.
    pub async fn send_raw(&self, request: &Request) -> SdkResult<Response> {
        self.transport.send(request).await
    }

    /// Sends one document and returns its `data`.
    ///
    /// Any remote error fails the call, classified by [`classify`].
    pub async fn send(&self, document: &str) -> SdkResult<serde_json::Value> {
        trace!(document, "sending query");
        let response = self.send_raw(&Request::new(document)).await?;

        if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
            debug!(count = errors.len(), "query returned errors");
            return Err(classify(errors));
        }

        match response.data {
            Some(serde_json::Value::Null) | None => {
                warn!("response carried no data");
                Err(SdkError::new(ErrorCode::NoData, "no data in response"))
            }
            Some(data) => Ok(data),
        }
    }

    /// Fetches the engine's introspection document.
    ///
    /// The result is `{"__schema": ...}`, ready for the schema parser.
    pub async fn introspect(&self) -> SdkResult<serde_json::Value> {
        let data = self.send(INTROSPECTION_QUERY).await?;
        if data.get("__schema").is_none() {
            return Err(SdkError::unexpected_shape(
                "introspection response has no __schema",
            ));
        }
        Ok(data)
    }
}
