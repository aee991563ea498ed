//! Contract handles: typed actions and table cursors

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use bitcash_codec::{AbiDef, Pack};
use bitcash_primitives::{Name, PermissionLevel};
use bitcash_types::Action;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::types::{GetTableByScopeParams, GetTableRowsParams, TableScope};
use crate::{ApiClient, SdkError};

/// Rows fetched per request when reading a whole table
pub const DEFAULT_ROWS_PER_REQUEST: u32 = 100;

/// Action parameter struct of a contract
pub trait ActionData: Pack + Serialize {
    /// Action name
    const ACTION: &'static str;
}

/// Options for building an action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOptions {
    /// Authorizing permission levels; empty leaves them for the session to fill
    pub authorization: Vec<PermissionLevel>,
}

impl ActionOptions {
    /// Authorize with a single permission level
    pub fn authorized_by(level: PermissionLevel) -> Self {
        Self { authorization: vec![level] }
    }
}

/// Deployed contract: account, ABI and the client used to read its tables
#[derive(Clone)]
pub struct Contract {
    account: Name,
    abi: Arc<AbiDef>,
    client: ApiClient,
}

impl Contract {
    /// Create a contract handle
    pub fn new(account: Name, abi: Arc<AbiDef>, client: ApiClient) -> Self {
        Self { account, abi, client }
    }

    /// Contract account
    pub fn account(&self) -> Name {
        self.account
    }

    /// Contract ABI
    pub fn abi(&self) -> &AbiDef {
        &self.abi
    }

    /// Client used for table reads
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // ==================== Actions ====================

    /// Build a typed action
    pub fn action<T: ActionData>(&self, data: &T, options: ActionOptions) -> Result<Action, SdkError> {
        let name: Name = T::ACTION.parse()?;
        self.action_named(name, data, options)
    }

    /// Build an action by name with pre-typed data
    pub fn action_named<T: Pack + ?Sized>(
        &self,
        name: Name,
        data: &T,
        options: ActionOptions,
    ) -> Result<Action, SdkError> {
        if self.abi.action(name).is_none() {
            return Err(SdkError::UnknownAction { contract: self.account.to_string(), action: name.to_string() });
        }
        Ok(Action::new(self.account, name, options.authorization, data))
    }

    // ==================== Tables ====================

    /// Typed handle on a table; scope defaults to the contract account
    pub fn table<R: DeserializeOwned>(&self, name: Name, scope: Option<&str>) -> Result<Table<R>, SdkError> {
        if !self.abi.has_table(name) {
            return Err(SdkError::UnknownTable { contract: self.account.to_string(), table: name.to_string() });
        }
        let scope = match scope {
            Some(scope) if !scope.is_empty() => scope.to_string(),
            _ => self.account.to_string(),
        };
        Ok(Table { client: self.client.clone(), code: self.account, name, scope, _row: PhantomData })
    }

    /// Table handle with rows as raw JSON
    pub fn table_json(&self, name: Name, scope: Option<&str>) -> Result<Table<Value>, SdkError> {
        self.table(name, scope)
    }

    /// Tables declared in the ABI
    pub fn table_names(&self) -> Vec<Name> {
        self.abi.table_names().collect()
    }
}

/// Row query options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// First primary key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Last primary key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// 1-based index position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// Key type of the index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    /// Lower bound on the selected index; takes precedence over `from`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<String>,
    /// Upper bound on the selected index; takes precedence over `to`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<String>,
    /// Maximum rows in total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Iterate from the upper bound down
    pub reverse: bool,
}

/// Scope query options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeParams {
    /// Inclusive lower bound
    pub lower_bound: Option<String>,
    /// Inclusive upper bound
    pub upper_bound: Option<String>,
    /// Maximum scopes in total
    pub limit: Option<u32>,
}

/// Contract table in one scope, rows decoded as `R`
pub struct Table<R> {
    client: ApiClient,
    code: Name,
    name: Name,
    scope: String,
    _row: PhantomData<fn() -> R>,
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl<R: DeserializeOwned> Table<R> {
    /// Table name
    pub fn name(&self) -> Name {
        self.name
    }

    /// Scope
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn base_params(&self) -> GetTableRowsParams {
        GetTableRowsParams::new(self.code, self.scope.clone(), self.name)
    }

    /// Row with primary key `key`, or the first row when `key` is `None`
    pub async fn get(&self, key: Option<&str>) -> Result<Option<R>, SdkError> {
        let mut params = self.base_params();
        params.limit = Some(1);
        if let Some(key) = key {
            params.lower_bound = Some(key.to_string());
            params.upper_bound = Some(key.to_string());
        }
        debug!(table = %self.name, scope = %self.scope, ?key, "get row");
        let page = self.client.get_table_rows::<R>(&params).await?;
        Ok(page.rows.into_iter().next())
    }

    /// Cursor over the rows matching `query`
    pub fn query(&self, query: QueryParams) -> TableCursor<R> {
        let mut params = self.base_params();
        params.lower_bound = query.lower_bound.or(query.from);
        params.upper_bound = query.upper_bound.or(query.to);
        params.index_position = query.index.map(|i| i.to_string());
        params.key_type = query.key_type;
        params.reverse = query.reverse.then_some(true);

        TableCursor {
            client: self.client.clone(),
            params,
            max_rows: query.limit,
            fetched: 0,
            done: false,
            _row: PhantomData,
        }
    }

    /// Every row in the scope
    pub async fn all(&self) -> Result<Vec<R>, SdkError> {
        self.query(QueryParams::default()).all().await
    }

    /// Cursor over the scopes holding rows of this table
    pub fn scopes(&self, params: ScopeParams) -> ScopeCursor {
        ScopeCursor {
            client: self.client.clone(),
            params: GetTableByScopeParams {
                code: self.code,
                table: Some(self.name),
                lower_bound: params.lower_bound,
                upper_bound: params.upper_bound,
                limit: None,
                reverse: None,
            },
            max_scopes: params.limit,
            fetched: 0,
            done: false,
        }
    }
}

/// Paging cursor over table rows
///
/// Follows `more`/`next_key`; reverse queries move the upper bound down.
pub struct TableCursor<R> {
    client: ApiClient,
    params: GetTableRowsParams,
    max_rows: Option<u32>,
    fetched: u32,
    done: bool,
    _row: PhantomData<fn() -> R>,
}

impl<R: DeserializeOwned> TableCursor<R> {
    /// All rows have been read
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Next page of at most `count` rows; empty once done
    pub async fn next(&mut self, count: u32) -> Result<Vec<R>, SdkError> {
        let want = match self.max_rows {
            Some(max) => count.min(max.saturating_sub(self.fetched)),
            None => count,
        };
        if self.done || want == 0 {
            self.done = self.done || self.max_rows.is_some_and(|max| self.fetched >= max);
            return Ok(Vec::new());
        }

        self.params.limit = Some(want);
        let page = self.client.get_table_rows::<R>(&self.params).await?;
        self.fetched = self.fetched.saturating_add(page.rows.len() as u32);

        let bound = if self.params.reverse == Some(true) {
            &mut self.params.upper_bound
        } else {
            &mut self.params.lower_bound
        };
        if !page.more || page.next_key.is_empty() || bound.as_deref() == Some(page.next_key.as_str()) {
            self.done = true;
        } else {
            *bound = Some(page.next_key);
        }
        if self.max_rows.is_some_and(|max| self.fetched >= max) {
            self.done = true;
        }

        Ok(page.rows)
    }

    /// Remaining rows
    pub async fn all(&mut self) -> Result<Vec<R>, SdkError> {
        let mut rows = Vec::new();
        while !self.done {
            rows.extend(self.next(DEFAULT_ROWS_PER_REQUEST).await?);
        }
        Ok(rows)
    }
}

/// Paging cursor over table scopes
pub struct ScopeCursor {
    client: ApiClient,
    params: GetTableByScopeParams,
    max_scopes: Option<u32>,
    fetched: u32,
    done: bool,
}

impl ScopeCursor {
    /// All scopes have been read
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Next page of at most `count` scopes; empty once done
    pub async fn next(&mut self, count: u32) -> Result<Vec<TableScope>, SdkError> {
        let want = match self.max_scopes {
            Some(max) => count.min(max.saturating_sub(self.fetched)),
            None => count,
        };
        if self.done || want == 0 {
            self.done = true;
            return Ok(Vec::new());
        }

        self.params.limit = Some(want);
        let page = self.client.get_table_by_scope(&self.params).await?;
        self.fetched = self.fetched.saturating_add(page.rows.len() as u32);

        if page.more.is_empty() || self.params.lower_bound.as_deref() == Some(page.more.as_str()) {
            self.done = true;
        } else {
            self.params.lower_bound = Some(page.more);
        }
        if self.max_scopes.is_some_and(|max| self.fetched >= max) {
            self.done = true;
        }

        Ok(page.rows)
    }

    /// Remaining scopes
    pub async fn all(&mut self) -> Result<Vec<TableScope>, SdkError> {
        let mut scopes = Vec::new();
        while !self.done {
            scopes.extend(self.next(DEFAULT_ROWS_PER_REQUEST).await?);
        }
        Ok(scopes)
    }
}
