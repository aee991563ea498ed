//! Transaction builder

use bitcash_primitives::Checksum256;
use bitcash_types::{Action, SignedTransaction, Transaction, TransactionHeader};

use crate::types::ChainInfo;
use crate::{SdkError, Wallet};

/// Default seconds between the head block time and expiration
pub const DEFAULT_EXPIRE_SECONDS: u32 = 120;

/// Transaction builder with fluent API
#[derive(Debug, Clone)]
pub struct TxBuilder {
    chain_id: Checksum256,
    reference: Option<ChainInfo>,
    header: Option<TransactionHeader>,
    expire_seconds: u32,
    max_net_usage_words: u32,
    max_cpu_usage_ms: u8,
    delay_sec: u32,
    context_free_actions: Vec<Action>,
    actions: Vec<Action>,
}

impl TxBuilder {
    /// Create a new transaction builder
    pub fn new(chain_id: Checksum256) -> Self {
        Self {
            chain_id,
            reference: None,
            header: None,
            expire_seconds: DEFAULT_EXPIRE_SECONDS,
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
            context_free_actions: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Reference the last irreversible block of `info` and expire relative
    /// to its head block time
    pub fn reference(mut self, info: &ChainInfo) -> Self {
        self.reference = Some(info.clone());
        self
    }

    /// Use an explicit header; resource limits set on the builder still apply
    pub fn header(mut self, header: TransactionHeader) -> Self {
        self.header = Some(header);
        self
    }

    /// Set seconds until expiration
    pub fn expire_seconds(mut self, secs: u32) -> Self {
        self.expire_seconds = secs;
        self
    }

    /// Set the net usage limit in 8-byte words
    pub fn max_net_usage_words(mut self, words: u32) -> Self {
        self.max_net_usage_words = words;
        self
    }

    /// Set the CPU usage limit
    pub fn max_cpu_usage_ms(mut self, ms: u8) -> Self {
        self.max_cpu_usage_ms = ms;
        self
    }

    /// Set the execution delay
    pub fn delay_sec(mut self, secs: u32) -> Self {
        self.delay_sec = secs;
        self
    }

    /// Add an action
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Add several actions
    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Add a context-free action
    pub fn context_free_action(mut self, action: Action) -> Self {
        self.context_free_actions.push(action);
        self
    }

    /// Build the unsigned transaction
    pub fn build(self) -> Result<Transaction, SdkError> {
        let mut header = match (self.header, &self.reference) {
            (Some(header), _) => header,
            (None, Some(info)) => info.transaction_header(self.expire_seconds),
            (None, None) => return Err(SdkError::MissingField("reference block".into())),
        };
        if self.actions.is_empty() && self.context_free_actions.is_empty() {
            return Err(SdkError::MissingField("actions".into()));
        }
        if let Some(action) = self.actions.iter().find(|a| !a.is_authorized()) {
            return Err(SdkError::MissingField(format!("authorization for {}::{}", action.account, action.name)));
        }

        header.max_net_usage_words = self.max_net_usage_words.into();
        header.max_cpu_usage_ms = self.max_cpu_usage_ms;
        header.delay_sec = self.delay_sec.into();

        Ok(Transaction {
            header,
            context_free_actions: self.context_free_actions,
            actions: self.actions,
            transaction_extensions: Vec::new(),
        })
    }

    /// Build and sign the transaction
    pub fn sign(self, wallet: &Wallet) -> Result<SignedTransaction, SdkError> {
        let chain_id = self.chain_id;
        let trx = self.build()?;
        wallet.sign_transaction(trx, &chain_id)
    }
}
