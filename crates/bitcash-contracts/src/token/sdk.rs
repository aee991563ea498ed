//! Token creation and listing

use bitcash_primitives::{Asset, Name, PermissionLevel};
use bitcash_sdk::types::GetTableByScopeParams;
use bitcash_sdk::{
    create_transaction_with_session, ActionOptions, ApiClient, Environment, SdkError, Session, TransactResult, Wallet,
};
use serde::Serialize;
use tracing::{debug, error, warn};

use super::{Contract, Create, CurrencyStats, TableName};

/// Permission used by [`TokenSdk::create_token`] when none is given
pub const DEFAULT_TOKEN_PERMISSION: &str = "token.bk@active";

/// Scopes of `stat` read per listing
const TOKEN_SCOPE_LIMIT: u32 = 100;

/// Summary of one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    /// Symbol code, e.g. `BTC`
    pub symbol: String,
    /// Decimal places
    pub precision: u8,
    /// Issued supply
    pub supply: String,
    /// Supply cap
    pub max_supply: String,
    /// Issuer
    pub issuer: String,
}

impl From<&CurrencyStats> for TokenInfo {
    fn from(stats: &CurrencyStats) -> Self {
        let symbol = stats.supply.symbol();
        TokenInfo {
            symbol: symbol.code().to_string(),
            precision: symbol.precision(),
            supply: stats.supply.to_string(),
            max_supply: stats.max_supply.to_string(),
            issuer: stats.issuer.to_string(),
        }
    }
}

/// Token contract client bound to an [`Environment`]
#[derive(Clone)]
pub struct TokenSdk {
    client: ApiClient,
    env: Environment,
    contract: Contract,
}

impl TokenSdk {
    /// Client for the token contract at `env.token_contract`
    pub fn new(client: ApiClient, env: Environment) -> Result<Self, SdkError> {
        let contract = Contract::with_account(env.token_contract, client.clone())?;
        Ok(TokenSdk { client, env, contract })
    }

    /// Typed contract handle
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Signing session for `permission`.
    ///
    /// `permission` is `actor@permission`; a bare permission name acts as
    /// the token contract account.
    pub fn create_session(&self, private_key: &str, permission: &str) -> Result<Session, SdkError> {
        let wallet = Wallet::from_key_str(private_key)?;
        let level = self.permission_level(permission)?;
        debug!(%level, public_key = %wallet.public_key(), "token session");
        Ok(Session::new(self.client.clone(), self.env.chain_id, level, wallet))
    }

    fn permission_level(&self, permission: &str) -> Result<PermissionLevel, SdkError> {
        if permission.contains('@') {
            Ok(permission.parse()?)
        } else {
            Ok(PermissionLevel::new(self.contract.account(), permission.parse()?))
        }
    }

    /// Create `symbol` with a supply cap of `max_supply`, formatted with
    /// `precision` decimals.
    pub async fn create_token(
        &self,
        issuer: Name,
        symbol: &str,
        precision: u8,
        max_supply: f64,
        private_key: &str,
        permission: Option<&str>,
    ) -> Result<TransactResult, SdkError> {
        let result = async {
            let session = self.create_session(private_key, permission.unwrap_or(DEFAULT_TOKEN_PERMISSION))?;
            let maximum_supply = Asset::from_float(max_supply, precision, symbol)?;
            debug!(%issuer, %maximum_supply, "creating token");
            let action = self.contract.action(&Create { issuer, maximum_supply }, ActionOptions::default())?;
            create_transaction_with_session(&session, action).await
        };
        result.await.map_err(|e| {
            error!(%issuer, symbol, error = %e, "token creation failed");
            e
        })
    }

    /// Every token with a `stat` row
    pub async fn get_all_tokens(&self) -> Result<Vec<TokenInfo>, SdkError> {
        let params = GetTableByScopeParams {
            code: self.contract.account(),
            table: Some(TableName::Stat.name()),
            lower_bound: None,
            upper_bound: None,
            limit: Some(TOKEN_SCOPE_LIMIT),
            reverse: None,
        };
        let scopes = self.client.get_table_by_scope(&params).await?;
        if !scopes.more.is_empty() {
            warn!(next = %scopes.more, "more token scopes than listed");
        }

        let mut tokens = Vec::with_capacity(scopes.rows.len());
        for scope in &scopes.rows {
            let table = self.contract.table::<CurrencyStats>(TableName::Stat, Some(&scope.scope))?;
            if let Some(stats) = table.get(None).await? {
                tokens.push(TokenInfo::from(&stats));
            }
        }
        debug!(count = tokens.len(), "listed tokens");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sdk() -> TokenSdk {
        TokenSdk::new(ApiClient::new_mock(), Environment::default()).unwrap()
    }

    #[test]
    fn test_permission_binding() {
        let sdk = sdk();
        assert_eq!(sdk.permission_level("active").unwrap().to_string(), "token.bk@active");
        assert_eq!(sdk.permission_level("alice@owner").unwrap().to_string(), "alice@owner");
        assert!(sdk.permission_level("Bad@active").is_err());
    }

    #[test]
    fn test_session_requires_key() {
        let err = sdk().create_session("", DEFAULT_TOKEN_PERMISSION).unwrap_err();
        assert_eq!(err.to_string(), "Private key is required");
    }

    #[test]
    fn test_token_info_from_stats() {
        let stats = CurrencyStats {
            supply: "12.50 USD".parse().unwrap(),
            max_supply: "1000.00 USD".parse().unwrap(),
            issuer: "alice".parse().unwrap(),
        };
        let info = TokenInfo::from(&stats);
        assert_eq!(info.symbol, "USD");
        assert_eq!(info.precision, 2);
        assert_eq!(info.max_supply, "1000.00 USD");
        assert_eq!(serde_json::to_value(&info).unwrap()["maxSupply"], "1000.00 USD");
    }
}
