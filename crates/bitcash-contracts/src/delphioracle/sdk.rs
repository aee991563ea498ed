//! High-level oracle operations
//!
//! Every write builds one action authorized by `owner@permission` and
//! submits it with [`create_transaction`]. Failures are logged and
//! normalized to a single message: the node's error details when there are
//! any, else a per-operation fallback.

use bitcash_primitives::{Checksum256, Name, PermissionLevel};
use bitcash_sdk::types::TableScope;
use bitcash_sdk::{
    create_transaction, ActionData, ActionOptions, ApiClient, Environment, QueryParams, ScopeParams, SdkError,
    TransactResult,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use super::{
    Claim, Contract, DeletePair, EditPair, NewBounty, PairInput, Pairs, Quote, RegUser, Stats, TableName,
    VoteBounty, Write, WriteHash,
};

/// Rows fetched by table reads when no limit is given
pub const DEFAULT_QUERY_LIMIT: u32 = 100;

/// Table read request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    /// Table name
    pub table: String,
    /// Scope, the contract account when `None`
    pub scope: Option<String>,
    /// Fetch the single row with this primary key
    pub primary_key: Option<String>,
    /// First primary key
    pub from: Option<String>,
    /// Last primary key
    pub to: Option<String>,
    /// 1-based secondary index position
    pub index_position: Option<u32>,
    /// Key type of the index
    pub key_type: Option<String>,
    /// Lower bound on the selected index
    pub lower_bound: Option<String>,
    /// Upper bound on the selected index
    pub upper_bound: Option<String>,
    /// Maximum rows, [`DEFAULT_QUERY_LIMIT`] when `None`
    pub limit: Option<u32>,
    /// Iterate from the upper bound down
    pub reverse: bool,
    /// Return only the first page
    pub paginate: bool,
}

impl TableQuery {
    /// Query every row of `table`
    pub fn new(table: impl Into<String>) -> Self {
        TableQuery { table: table.into(), ..Default::default() }
    }

    fn query_params(&self) -> QueryParams {
        QueryParams {
            from: self.from.clone(),
            to: self.to.clone(),
            index: self.index_position,
            key_type: self.key_type.clone(),
            lower_bound: self.lower_bound.clone(),
            upper_bound: self.upper_bound.clone(),
            limit: Some(self.limit.unwrap_or(DEFAULT_QUERY_LIMIT)),
            reverse: self.reverse,
        }
    }
}

/// First page of a paginated read
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    /// Rows of the page
    pub rows: Vec<Value>,
    /// The page is full, so more rows may follow
    pub has_more: bool,
    /// Table read
    pub table_name: String,
    /// Effective query
    pub query_params: QueryParams,
}

/// Result of [`OracleSdk::read_table_data`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableQueryResult {
    /// Row looked up by primary key, `None` when absent
    Row(Option<Value>),
    /// First page of a paginated read
    Page(TablePage),
    /// Every matching row
    Rows {
        /// Rows
        rows: Vec<Value>,
        /// Table read
        #[serde(rename = "tableName")]
        table_name: String,
    },
}

impl TableQueryResult {
    /// Rows held by the result
    pub fn rows(&self) -> Vec<&Value> {
        match self {
            TableQueryResult::Row(row) => row.iter().collect(),
            TableQueryResult::Page(page) => page.rows.iter().collect(),
            TableQueryResult::Rows { rows, .. } => rows.iter().collect(),
        }
    }
}

/// Oracle client bound to an [`Environment`]
#[derive(Clone)]
pub struct OracleSdk {
    client: ApiClient,
    env: Environment,
    contract: Contract,
}

impl OracleSdk {
    /// Client for the oracle contract at `env.oracle_contract`
    pub fn new(client: ApiClient, env: Environment) -> Result<Self, SdkError> {
        let contract = Contract::with_account(env.oracle_contract, client.clone())?;
        Ok(OracleSdk { client, env, contract })
    }

    /// Typed contract handle
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Environment in use
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    // ==================== Writes ====================

    /// Register `owner` as an oracle
    pub async fn register_user(&self, owner: Name) -> Result<TransactResult, SdkError> {
        self.submit(owner, &RegUser { owner }, "Failed to register user").await
    }

    /// Submit quotes
    pub async fn write_oracle_data(&self, owner: Name, quotes: Vec<Quote>) -> Result<TransactResult, SdkError> {
        self.submit(owner, &Write { owner, quotes }, "Failed to write oracle data").await
    }

    /// Claim accumulated rewards
    pub async fn claim_oracle_rewards(&self, owner: Name) -> Result<TransactResult, SdkError> {
        self.submit(owner, &Claim { owner }, "Failed to claim oracle rewards").await
    }

    /// Propose a new pair
    pub async fn create_new_pair(&self, proposer: Name, pair: PairInput) -> Result<TransactResult, SdkError> {
        self.submit(proposer, &NewBounty { proposer, pair }, "Failed to create new trading pair").await
    }

    /// Vote for a pair bounty
    pub async fn vote_bounty(&self, owner: Name, bounty: Name) -> Result<TransactResult, SdkError> {
        self.submit(owner, &VoteBounty { owner, bounty }, "Failed to vote for bounty").await
    }

    /// Commit a hash for the multi-party oracle
    pub async fn write_hash(
        &self,
        owner: Name,
        hash: Checksum256,
        reveal: impl Into<String>,
    ) -> Result<TransactResult, SdkError> {
        let data = WriteHash { owner, hash, reveal: reveal.into() };
        self.submit(owner, &data, "Failed to write hash").await
    }

    /// Delete `pair`, signed by `owner`
    pub async fn delete_pair(
        &self,
        owner: Name,
        pair: Name,
        reason: impl Into<String>,
    ) -> Result<TransactResult, SdkError> {
        let data = DeletePair { name: pair, reason: reason.into() };
        self.submit(owner, &data, "Failed to delete pair").await
    }

    /// Replace a pair definition, signed by `owner`
    pub async fn edit_pair(&self, owner: Name, pair: Pairs) -> Result<TransactResult, SdkError> {
        self.submit(owner, &EditPair { pair }, "Failed to edit pair").await
    }

    async fn submit<T: ActionData>(&self, actor: Name, data: &T, fallback: &str) -> Result<TransactResult, SdkError> {
        let action = T::ACTION;
        self.sign_and_send(actor, data).await.map_err(|e| {
            error!(%actor, action, error = %e, "{fallback}");
            e.normalize(fallback)
        })
    }

    async fn sign_and_send<T: ActionData>(&self, actor: Name, data: &T) -> Result<TransactResult, SdkError> {
        let level = PermissionLevel::new(actor, self.env.permission.parse()?);
        if let Ok(json) = serde_json::to_value(data) {
            debug!(action = T::ACTION, data = %json, "creating action");
        }
        let action = self.contract.action(data, ActionOptions::authorized_by(level))?;
        create_transaction(&self.client, self.env.chain_id, action, &self.env.private_key, &self.env.permission).await
    }

    // ==================== Reads ====================

    /// Statistics row of `owner`, `None` when the oracle has none
    pub async fn get_oracle_stats(&self, owner: Name) -> Result<Option<Stats>, SdkError> {
        let result = async {
            let table = self.contract.table::<Stats>(TableName::Stats, None)?;
            table.get(Some(&owner.to_string())).await
        };
        result.await.map_err(|e| {
            error!(%owner, error = %e, "Failed to fetch oracle stats");
            e.normalize("Failed to fetch oracle stats")
        })
    }

    /// Every row of `pairs`
    pub async fn get_all_pairs(&self) -> Result<Vec<Pairs>, SdkError> {
        let result = async {
            let table = self.contract.table::<Pairs>(TableName::Pairs, None)?;
            table.all().await
        };
        result.await.map_err(|e| {
            error!(error = %e, "Failed to fetch pairs");
            e.normalize("Failed to fetch pairs")
        })
    }

    /// Read a table: one row by primary key, the first page when
    /// paginating, or every matching row up to the limit.
    ///
    /// Unknown table names fail with "Table 'x' does not exist in contract".
    pub async fn read_table_data(&self, query: &TableQuery) -> Result<TableQueryResult, SdkError> {
        self.read_table(query).await.map_err(|e| {
            error!(table = %query.table, error = %e, "table query failed");
            e.normalize(&format!("Failed to query table {}", query.table))
        })
    }

    /// Same as [`read_table_data`](Self::read_table_data)
    pub async fn query_table_data(&self, query: &TableQuery) -> Result<TableQueryResult, SdkError> {
        self.read_table_data(query).await
    }

    async fn read_table(&self, query: &TableQuery) -> Result<TableQueryResult, SdkError> {
        let table_name: TableName = query.table.parse()?;
        debug!(table = %table_name, scope = ?query.scope, "querying table");
        let table = self.contract.table_json(table_name, query.scope.as_deref())?;

        if let Some(key) = query.primary_key.as_deref() {
            let row = table.get(Some(key)).await?;
            debug!(found = row.is_some(), "single row response");
            return Ok(TableQueryResult::Row(row));
        }

        let params = query.query_params();
        let limit = params.limit.unwrap_or(DEFAULT_QUERY_LIMIT);
        let mut cursor = table.query(params.clone());

        if query.paginate {
            let rows = cursor.next(limit).await?;
            return Ok(TableQueryResult::Page(TablePage {
                has_more: rows.len() == limit as usize,
                rows,
                table_name: table_name.to_string(),
                query_params: params,
            }));
        }

        let rows = cursor.all().await?;
        debug!(count = rows.len(), table = %table_name, "retrieved rows");
        Ok(TableQueryResult::Rows { rows, table_name: table_name.to_string() })
    }

    /// Scopes holding rows of `table`
    pub async fn get_table_scopes(&self, table: &str, params: ScopeParams) -> Result<Vec<TableScope>, SdkError> {
        let result = async {
            let table_name: TableName = table.parse()?;
            let params = ScopeParams { limit: Some(params.limit.unwrap_or(DEFAULT_QUERY_LIMIT)), ..params };
            let scopes = self.contract.table_json(table_name, None)?.scopes(params).all().await?;
            debug!(count = scopes.len(), table = %table_name, "retrieved scopes");
            Ok::<_, SdkError>(scopes)
        };
        result.await.map_err(|e| {
            error!(table, error = %e, "scope query failed");
            e.normalize(&format!("Failed to get scopes for table {table}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_defaults() {
        let params = TableQuery::new("pairs").query_params();
        assert_eq!(params.limit, Some(DEFAULT_QUERY_LIMIT));
        assert!(!params.reverse);
        assert_eq!(params.index, None);
    }

    #[test]
    fn test_page_json_shape() {
        let page = TableQueryResult::Page(TablePage {
            rows: vec![serde_json::json!({"name": "btcusd"})],
            has_more: false,
            table_name: "pairs".into(),
            query_params: QueryParams { limit: Some(10), ..Default::default() },
        });
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["hasMore"], false);
        assert_eq!(json["tableName"], "pairs");
        assert_eq!(json["queryParams"]["limit"], 10);
        assert_eq!(page.rows().len(), 1);

        let rows = TableQueryResult::Rows { rows: vec![], table_name: "stats".into() };
        assert_eq!(serde_json::to_value(&rows).unwrap(), serde_json::json!({"rows": [], "tableName": "stats"}));
        assert_eq!(serde_json::to_value(TableQueryResult::Row(None)).unwrap(), Value::Null);
    }
}
