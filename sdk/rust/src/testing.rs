//! Scripted transport for exercising bindings without an engine.
//!
//! ```ignore
//! let mock = MockTransport::new();
//! mock.respond(json!({"data": {"version": "1.0"}}));
//! let client = Client::new(mock.connection());
//! assert_eq!(client.version().await?, "1.0");
//! assert_eq!(mock.requests(), vec!["query {version}"]);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::client::{Connection, Request, Response, Transport};
use crate::error::{SdkError, SdkResult};

/// Answers requests from a queue of canned response bodies and records
/// every document it receives.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<serde_json::Value>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues the body returned for the next unanswered request.
    pub fn respond(&self, body: serde_json::Value) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(body);
        self
    }

    /// Documents received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A connection backed by this transport.
    pub fn connection(self: &Arc<Self>) -> Connection {
        Connection::new(self.clone())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &Request) -> SdkResult<Response> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.query.clone());

        let body = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| SdkError::network("no scripted response left"))?;

        serde_json::from_value(body).map_err(|e| SdkError::deserialize(e.to_string()))
    }
}
