//! ApiClient - chain HTTP API client

use std::sync::Arc;

use bitcash_primitives::Name;
use bitcash_types::PackedTransaction;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::transport::{deserialize_response, MockTransport, Transport};
use crate::types::{
    ChainInfo, GetAbiResponse, GetTableByScopeParams, GetTableRowsParams, PushTransactionResponse, TableRows,
    TableScopes,
};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Client for the node's `/v1/chain` API
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a new client with HTTP transport
    #[cfg(feature = "http")]
    pub fn new(url: &str) -> Self {
        Self { transport: Arc::new(HttpTransport::new(url)) }
    }

    /// Create a new client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self { transport: Arc::new(MockTransport::new()) }
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self { transport: Arc::new(transport) }
    }

    async fn request<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, SdkError> {
        debug!(path, "chain api request");
        let value = self.transport.post_json(path, serde_json::to_value(body)?).await?;
        deserialize_response(value)
    }

    // ==================== Chain Info ====================

    /// Get chain state: head and last irreversible blocks
    pub async fn get_info(&self) -> Result<ChainInfo, SdkError> {
        self.request("/v1/chain/get_info", &json!({})).await
    }

    /// Get a contract's ABI
    pub async fn get_abi(&self, account: Name) -> Result<GetAbiResponse, SdkError> {
        self.request("/v1/chain/get_abi", &json!({ "account_name": account })).await
    }

    // ==================== Tables ====================

    /// Get a page of table rows
    pub async fn get_table_rows<T: DeserializeOwned>(
        &self,
        params: &GetTableRowsParams,
    ) -> Result<TableRows<T>, SdkError> {
        self.request("/v1/chain/get_table_rows", params).await
    }

    /// Get a page of the scopes a contract's tables are stored under
    pub async fn get_table_by_scope(&self, params: &GetTableByScopeParams) -> Result<TableScopes, SdkError> {
        self.request("/v1/chain/get_table_by_scope", params).await
    }

    // ==================== Transactions ====================

    /// Submit a signed transaction and wait for its execution trace
    pub async fn send_transaction(&self, trx: &PackedTransaction) -> Result<PushTransactionResponse, SdkError> {
        self.request("/v1/chain/push_transaction", trx).await
    }
}
