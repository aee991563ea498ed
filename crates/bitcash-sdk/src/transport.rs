//! Transport layer for the chain HTTP API

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::SdkError;

/// Transport trait for chain API calls (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to an API path such as `/v1/chain/get_info`
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, SdkError>;
}

/// Helper to deserialize response
pub fn deserialize_response<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, SdkError> {
    serde_json::from_value(value).map_err(|e| SdkError::Serialization(e.to_string()))
}

#[derive(Debug, Clone)]
enum MockReply {
    Ok(Value),
    Err { status: u16, body: Value },
}

impl MockReply {
    fn into_result(self) -> Result<Value, SdkError> {
        match self {
            MockReply::Ok(value) => Ok(value),
            MockReply::Err { status, body } => Err(SdkError::Rpc { status, body }),
        }
    }
}

/// Mock transport for testing
///
/// Replies are looked up per path: queued one-shot replies first, then the
/// persistent reply, then the built-in defaults. Clones share state, so a
/// test can keep a handle after giving one to a client.
#[derive(Clone)]
pub struct MockTransport {
    queued: Arc<Mutex<HashMap<String, VecDeque<MockReply>>>>,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    default_responses: Arc<HashMap<String, Value>>,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert("/v1/chain/get_info".to_string(), Self::sample_info());
        defaults.insert(
            "/v1/chain/push_transaction".to_string(),
            json!({
                "transaction_id": "be194c146b83b80bc4834e05afc67355c960b326acf8612ac72ddbc9f62c7584",
                "processed": {"receipt": {"status": "executed"}}
            }),
        );

        Self {
            queued: Arc::new(Mutex::new(HashMap::new())),
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_responses: Arc::new(defaults),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// `get_info` reply used by default
    pub fn sample_info() -> Value {
        json!({
            "server_version": "d133c641",
            "chain_id": crate::env::DEFAULT_CHAIN_ID,
            "head_block_num": 1000,
            "last_irreversible_block_num": 990,
            "last_irreversible_block_id": "000003de1b2c3d4e5f60718293a4b5c6d7e8f90112233445566778899aabbccd",
            "head_block_id": "000003e8aabbccddeeff00112233445566778899aabbccddeeff001122334455",
            "head_block_time": "2024-01-01T00:00:00.000",
            "head_block_producer": "producer1"
        })
    }

    /// Set a persistent reply for a path
    pub fn set_response(&self, path: &str, response: Value) {
        self.responses.lock().insert(path.to_string(), MockReply::Ok(response));
    }

    /// Set a persistent node error for a path
    pub fn set_error(&self, path: &str, status: u16, body: Value) {
        self.responses.lock().insert(path.to_string(), MockReply::Err { status, body });
    }

    /// Queue a one-shot reply for a path
    pub fn push_response(&self, path: &str, response: Value) {
        self.queued.lock().entry(path.to_string()).or_default().push_back(MockReply::Ok(response));
    }

    /// Queue a one-shot node error for a path
    pub fn push_error(&self, path: &str, status: u16, body: Value) {
        self.queued
            .lock()
            .entry(path.to_string())
            .or_default()
            .push_back(MockReply::Err { status, body });
    }

    /// Clear custom and queued replies
    pub fn clear_responses(&self) {
        self.responses.lock().clear();
        self.queued.lock().clear();
    }

    /// Requests received so far, as `(path, body)`
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().clone()
    }

    /// Bodies of the requests received on a path
    pub fn requests_to(&self, path: &str) -> Vec<Value> {
        self.requests.lock().iter().filter(|(p, _)| p == path).map(|(_, b)| b.clone()).collect()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, SdkError> {
        self.requests.lock().push((path.to_string(), body));

        let queued = self.queued.lock().get_mut(path).and_then(VecDeque::pop_front);
        if let Some(reply) = queued {
            return reply.into_result();
        }

        let custom = self.responses.lock().get(path).cloned();
        if let Some(reply) = custom {
            return reply.into_result();
        }

        if let Some(value) = self.default_responses.get(path) {
            return Ok(value.clone());
        }

        Err(SdkError::Rpc {
            status: 404,
            body: json!({
                "code": 404,
                "message": "Not Found",
                "error": {"code": 0, "name": "exception", "what": format!("Unknown Endpoint {path}"), "details": []}
            }),
        })
    }
}

/// HTTP transport for a real node
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport for a node base URL
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Node base URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, SdkError> {
        let url = format!("{}{}", self.url, path);
        tracing::trace!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| SdkError::Transport(e.to_string()))?;
        let parsed = serde_json::from_str::<Value>(&text);

        if !status.is_success() {
            let body = parsed.unwrap_or(Value::String(text));
            return Err(SdkError::Rpc { status: status.as_u16(), body });
        }

        parsed.map_err(|e| SdkError::Serialization(format!("invalid response from {url}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_info() {
        let mock = MockTransport::new();
        let info = mock.post_json("/v1/chain/get_info", json!({})).await.unwrap();
        assert_eq!(info["head_block_num"], 1000);
    }

    #[tokio::test]
    async fn test_queue_before_persistent() {
        let mock = MockTransport::new();
        mock.set_response("/v1/chain/get_table_rows", json!({"rows": [], "more": false}));
        mock.push_response("/v1/chain/get_table_rows", json!({"rows": [1], "more": true}));

        let first = mock.post_json("/v1/chain/get_table_rows", json!({})).await.unwrap();
        let second = mock.post_json("/v1/chain/get_table_rows", json!({})).await.unwrap();
        assert_eq!(first["rows"], json!([1]));
        assert_eq!(second["rows"], json!([]));
        assert_eq!(mock.requests_to("/v1/chain/get_table_rows").len(), 2);
    }

    #[tokio::test]
    async fn test_errors_and_unknown_paths() {
        let mock = MockTransport::new();
        mock.push_error("/v1/chain/push_transaction", 500, json!({"error": {"what": "boom"}}));
        let err = mock.post_json("/v1/chain/push_transaction", json!({})).await.unwrap_err();
        assert!(matches!(err, SdkError::Rpc { status: 500, .. }));

        let err = mock.post_json("/v1/chain/nope", json!({})).await.unwrap_err();
        assert!(matches!(err, SdkError::Rpc { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let mock = MockTransport::new();
        let handle = mock.clone();
        mock.post_json("/v1/chain/get_info", json!({})).await.unwrap();
        assert_eq!(handle.requests().len(), 1);
    }
}
