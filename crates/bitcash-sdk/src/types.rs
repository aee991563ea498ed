//! Request and response types of the chain HTTP API

use bitcash_codec::AbiDef;
use bitcash_primitives::{Checksum256, Name, TimePoint, TimePointSec};
use bitcash_types::TransactionHeader;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `get_info` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Node build
    #[serde(default)]
    pub server_version: String,
    /// Chain id
    pub chain_id: Checksum256,
    /// Head block number
    pub head_block_num: u32,
    /// Last irreversible block number
    pub last_irreversible_block_num: u32,
    /// Last irreversible block id
    pub last_irreversible_block_id: Checksum256,
    /// Head block id
    pub head_block_id: Checksum256,
    /// Head block timestamp
    pub head_block_time: TimePoint,
    /// Head block producer
    pub head_block_producer: Name,
}

impl ChainInfo {
    /// Header referencing the last irreversible block, expiring
    /// `expire_seconds` after the head block time
    pub fn transaction_header(&self, expire_seconds: u32) -> TransactionHeader {
        TransactionHeader::new(
            TimePointSec::from(self.head_block_time).saturating_add(expire_seconds),
            (self.last_irreversible_block_num & 0xffff) as u16,
            TransactionHeader::block_prefix(&self.last_irreversible_block_id),
        )
    }
}

/// `get_table_rows` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetTableRowsParams {
    /// Decode rows to JSON with the contract ABI
    pub json: bool,
    /// Contract account
    pub code: Name,
    /// Table scope
    pub scope: String,
    /// Table name
    pub table: Name,
    /// Inclusive lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<String>,
    /// Inclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<String>,
    /// Maximum rows to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Key type of the index, e.g. `i64` or `name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    /// 1-based index position, `1` being the primary key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_position: Option<String>,
    /// Iterate from the upper bound down
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
    /// Include the RAM payer of each row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_payer: Option<bool>,
}

impl GetTableRowsParams {
    /// Query a table with JSON rows and no bounds
    pub fn new(code: Name, scope: impl Into<String>, table: Name) -> Self {
        Self {
            json: true,
            code,
            scope: scope.into(),
            table,
            lower_bound: None,
            upper_bound: None,
            limit: None,
            key_type: None,
            index_position: None,
            reverse: None,
            show_payer: None,
        }
    }
}

/// `get_table_rows` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRows<T = Value> {
    /// Rows
    pub rows: Vec<T>,
    /// More rows are available past this page
    #[serde(default)]
    pub more: bool,
    /// Key of the first row of the next page
    #[serde(default)]
    pub next_key: String,
}

/// `get_table_by_scope` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetTableByScopeParams {
    /// Contract account
    pub code: Name,
    /// Restrict to one table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Name>,
    /// Inclusive lower bound on scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<String>,
    /// Inclusive upper bound on scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<String>,
    /// Maximum rows to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Iterate from the upper bound down
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

/// One scope of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableScope {
    /// Contract account
    pub code: Name,
    /// Scope
    pub scope: String,
    /// Table name
    pub table: Name,
    /// RAM payer
    pub payer: Name,
    /// Rows in this scope
    pub count: u32,
}

/// `get_table_by_scope` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableScopes {
    /// Scopes
    pub rows: Vec<TableScope>,
    /// Lower bound of the next page, empty when done
    #[serde(default)]
    pub more: String,
}

/// `push_transaction` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushTransactionResponse {
    /// Transaction id
    pub transaction_id: Checksum256,
    /// Execution trace
    #[serde(default)]
    pub processed: Value,
}

/// `get_abi` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAbiResponse {
    /// Contract account
    pub account_name: Name,
    /// ABI, absent when no contract is deployed
    #[serde(default)]
    pub abi: Option<AbiDef>,
}
