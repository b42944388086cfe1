//! HTTP transport backed by `reqwest`.
//!
//! One POST per request with a JSON body `{query, variables}`. Non-2xx
//! responses are still parsed: an engine that rejects a query usually
//! answers with a regular `errors` envelope.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use crate::client::{ClientConfig, Credential, Request, Response, Transport};
use crate::error::{ErrorCode, ResultExt, SdkError, SdkResult};

/// Sends requests to a single GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: reqwest::Url,
    credential: Option<Credential>,
}

impl HttpTransport {
    /// Builds the underlying HTTP client from `config`.
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        let url = reqwest::Url::parse(&config.url)
            .map_sdk_err_with(ErrorCode::InvalidUrl, config.url.as_str())?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_sdk_err_with(ErrorCode::ConfigError, format!("invalid header name {key}"))?;
            let value = HeaderValue::from_str(value).map_sdk_err_with(
                ErrorCode::ConfigError,
                format!("invalid value for header {key}"),
            )?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .build()
            .map_sdk_err_with(ErrorCode::ConfigError, "cannot build HTTP client")?;

        Ok(Self {
            client,
            url,
            credential: config.credential,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> SdkResult<Response> {
        let body = serde_json::to_string(request).map_err(|e| SdkError::serialize(e.to_string()))?;

        let mut builder = self.client.post(self.url.clone()).body(body);
        builder = match &self.credential {
            Some(Credential::Bearer(token)) => builder.bearer_auth(token),
            Some(Credential::Basic { username, password }) => {
                builder.basic_auth(username, Some(password.as_deref().unwrap_or_default()))
            }
            None => builder,
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        debug!(status = status.as_u16(), bytes = text.len(), "received response");

        match serde_json::from_str::<Response>(&text) {
            Ok(parsed) if status.is_success() || parsed.errors.is_some() => Ok(parsed),
            Ok(_) => Err(http_error(status, &text)),
            Err(_) if !status.is_success() => Err(http_error(status, &text)),
            Err(e) => Err(SdkError::new(
                ErrorCode::InvalidResponse,
                format!("cannot decode response: {e}"),
            )
            .with_extension("body", truncate(&text))),
        }
    }
}

fn transport_error(e: reqwest::Error) -> SdkError {
    if e.is_timeout() {
        SdkError::timeout()
    } else {
        SdkError::network(e.to_string())
    }
}

fn http_error(status: reqwest::StatusCode, body: &str) -> SdkError {
    SdkError::new(ErrorCode::HttpError, format!("HTTP {status}"))
        .with_extension("status", status.as_u16())
        .with_extension("body", truncate(body))
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
