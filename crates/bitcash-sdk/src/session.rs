//! Signing sessions and the one-action transaction helpers

use std::fmt;

use bitcash_crypto::Signature;
use bitcash_primitives::{Checksum256, Name, PermissionLevel};
use bitcash_types::{Action, SignedTransaction};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::tx_builder::DEFAULT_EXPIRE_SECONDS;
use crate::{ApiClient, SdkError, TxBuilder, Wallet};

/// Outcome of a submitted transaction
#[derive(Debug, Clone, Serialize)]
pub struct TransactResult {
    /// Transaction id
    pub transaction_id: Checksum256,
    /// Signatures attached to the transaction
    pub signatures: Vec<Signature>,
    /// The submitted transaction
    pub transaction: SignedTransaction,
    /// Execution trace returned by the node
    pub processed: Value,
}

/// Account, permission and key bound to one chain
pub struct Session {
    client: ApiClient,
    chain_id: Checksum256,
    permission_level: PermissionLevel,
    wallet: Wallet,
    expire_seconds: u32,
}

/// Omits the wallet
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("chain_id", &self.chain_id)
            .field("permission_level", &self.permission_level)
            .field("expire_seconds", &self.expire_seconds)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session
    pub fn new(client: ApiClient, chain_id: Checksum256, permission_level: PermissionLevel, wallet: Wallet) -> Self {
        Self { client, chain_id, permission_level, wallet, expire_seconds: DEFAULT_EXPIRE_SECONDS }
    }

    /// Set seconds until transactions expire
    pub fn with_expire_seconds(mut self, secs: u32) -> Self {
        self.expire_seconds = secs;
        self
    }

    /// Acting account
    pub fn actor(&self) -> Name {
        self.permission_level.actor
    }

    /// Permission level used for actions without authorization
    pub fn permission_level(&self) -> PermissionLevel {
        self.permission_level
    }

    /// Chain id
    pub fn chain_id(&self) -> &Checksum256 {
        &self.chain_id
    }

    /// Client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Sign and submit `actions` in one transaction
    pub async fn transact(&self, actions: Vec<Action>) -> Result<TransactResult, SdkError> {
        let actions: Vec<Action> = actions
            .into_iter()
            .map(|mut action| {
                if action.authorization.is_empty() {
                    action.authorization.push(self.permission_level);
                }
                action
            })
            .collect();

        let info = self.client.get_info().await?;
        if info.chain_id != self.chain_id {
            warn!(expected = %self.chain_id, node = %info.chain_id, "node reports a different chain id");
        }

        let signed = TxBuilder::new(self.chain_id)
            .reference(&info)
            .expire_seconds(self.expire_seconds)
            .actions(actions)
            .sign(&self.wallet)?;
        debug!(id = %signed.id(), actions = signed.transaction.actions.len(), "submitting transaction");

        let response = self.client.send_transaction(&signed.to_packed()).await?;
        info!(id = %response.transaction_id, "transaction executed");

        Ok(TransactResult {
            transaction_id: response.transaction_id,
            signatures: signed.signatures.clone(),
            transaction: signed,
            processed: response.processed,
        })
    }
}

/// Sign and submit a single action.
///
/// The session actor is the action's first authorizer, acting with
/// `permission`. An empty key fails before any request is made. Errors
/// are normalized with [`SdkError::normalize`].
pub async fn create_transaction(
    client: &ApiClient,
    chain_id: Checksum256,
    action: Action,
    private_key: &str,
    permission: &str,
) -> Result<TransactResult, SdkError> {
    let action_name = action.name;
    transact_one(client, chain_id, action, private_key, permission).await.map_err(|e| {
        error!(action = %action_name, error = %e, "transaction error");
        e.normalize("Unknown error occurred")
    })
}

async fn transact_one(
    client: &ApiClient,
    chain_id: Checksum256,
    action: Action,
    private_key: &str,
    permission: &str,
) -> Result<TransactResult, SdkError> {
    let actor = action
        .authorization
        .first()
        .map(|level| level.actor)
        .ok_or_else(|| SdkError::MissingField("authorization".into()))?;
    let wallet = Wallet::from_key_str(private_key)?;
    let permission_level = PermissionLevel::new(actor, permission.parse()?);
    debug!(%actor, %permission, public_key = %wallet.public_key(), "transaction session");

    let session = Session::new(client.clone(), chain_id, permission_level, wallet);
    session.transact(vec![action]).await
}

/// Sign and submit a single action with an existing session
pub async fn create_transaction_with_session(session: &Session, action: Action) -> Result<TransactResult, SdkError> {
    let action_name = action.name;
    session.transact(vec![action]).await.map_err(|e| {
        error!(action = %action_name, error = %e, "transaction error");
        e.normalize("Unknown error occurred")
    })
}
