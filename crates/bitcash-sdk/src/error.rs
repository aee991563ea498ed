//! SDK error types and node error normalization

use bitcash_codec::CodecError;
use bitcash_crypto::CryptoError;
use bitcash_primitives::PrimitiveError;
use serde_json::Value;
use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Error response from the node; `body` is its JSON error document
    #[error("RPC error {status}: {}", rpc_summary(.body))]
    Rpc {
        /// HTTP status
        status: u16,
        /// Response body
        body: Value,
    },

    /// No private key configured
    #[error("Private key is required")]
    MissingPrivateKey,

    /// Invalid private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Binary encoding error
    #[error("Encoding error: {0}")]
    Codec(#[from] CodecError),

    /// Invalid name, asset or other chain value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Action not declared in the contract ABI
    #[error("Action '{action}' does not exist in contract {contract}")]
    UnknownAction {
        /// Contract account
        contract: String,
        /// Action name
        action: String,
    },

    /// Table not declared in the contract ABI
    #[error("Table '{table}' does not exist in contract")]
    UnknownTable {
        /// Contract account
        contract: String,
        /// Table name
        table: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Normalized failure of an SDK operation
    #[error("{message}")]
    Operation {
        /// Human-readable message
        message: String,
        /// Underlying error
        #[source]
        source: Box<SdkError>,
    },
}

impl SdkError {
    /// Collapse into an [`SdkError::Operation`] whose message is the node's
    /// error detail, or `fallback` when none can be extracted.
    pub fn normalize(self, fallback: &str) -> SdkError {
        if matches!(self, SdkError::Operation { .. }) {
            return self;
        }
        let message = extract_error_details(&self).unwrap_or_else(|| fallback.to_string());
        SdkError::Operation { message, source: Box::new(self) }
    }

    /// JSON body of a node error, looking through normalized errors
    pub fn rpc_body(&self) -> Option<&Value> {
        match self {
            SdkError::Rpc { body, .. } => Some(body),
            SdkError::Operation { source, .. } => source.rpc_body(),
            _ => None,
        }
    }
}

/// Extract a human-readable message from an error.
///
/// For node errors: the `error.details` messages joined with `", "` (a
/// detail without a message contributes its JSON text), else `error.what`,
/// else the whole JSON body. For any other error: its display text.
/// `None` when that text is empty.
pub fn extract_error_details(err: &SdkError) -> Option<String> {
    let message = match err {
        SdkError::Rpc { body, .. } => details_from_body(body),
        SdkError::Operation { message, .. } => message.clone(),
        other => other.to_string(),
    };
    (!message.is_empty()).then_some(message)
}

fn details_from_body(body: &Value) -> String {
    let error = body.get("error");

    if let Some(details) = error.and_then(|e| e.get("details")).and_then(Value::as_array) {
        if !details.is_empty() {
            return details
                .iter()
                .map(|d| match d.get("message").and_then(Value::as_str) {
                    Some(msg) if !msg.is_empty() => msg.to_string(),
                    _ => d.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
        }
    }

    if let Some(what) = error.and_then(|e| e.get("what")).and_then(Value::as_str) {
        if !what.is_empty() {
            return what.to_string();
        }
    }

    match body {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn rpc_summary(body: &Value) -> String {
    details_from_body(body)
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<CryptoError> for SdkError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::SigningFailed(msg) => SdkError::SigningFailed(msg),
            other => SdkError::InvalidPrivateKey(other.to_string()),
        }
    }
}

impl From<PrimitiveError> for SdkError {
    fn from(e: PrimitiveError) -> Self {
        SdkError::InvalidValue(e.to_string())
    }
}
