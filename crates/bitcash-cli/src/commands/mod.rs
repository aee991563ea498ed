//! Subcommands and the state they share

pub mod oracle;
pub mod token;

use bitcash_contracts::{OracleSdk, TokenSdk};
use bitcash_sdk::{extract_error_details, ApiClient, Environment, SdkError, TransactResult};
use clap::Args;
use serde_json::json;

use crate::{output::Output, CliError};

/// Flags of commands that sign a transaction
#[derive(Debug, Clone, Default, Args)]
pub struct SigningArgs {
    /// Private key for signing transactions
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,
    /// Permission to use for signing
    #[arg(long, env = "PERMISSION")]
    pub permission: Option<String>,
}

/// Resolved environment and output mode
pub struct Context {
    /// Contract accounts, endpoint, key and chain
    pub env: Environment,
    /// Print JSON instead of text
    pub json: bool,
}

impl Context {
    /// Context for `env`
    pub fn new(env: Environment, json: bool) -> Self {
        Self { env, json }
    }

    fn client(&self) -> ApiClient {
        self.env.client()
    }

    fn signing_env(&self, signing: &SigningArgs) -> Environment {
        let mut env = self.env.clone();
        if let Some(key) = &signing.private_key {
            env = env.with_private_key(key.as_str());
        }
        if let Some(permission) = &signing.permission {
            env = env.with_permission(permission.as_str());
        }
        env
    }

    /// Oracle client, signing with `signing` over the defaults
    pub fn oracle(&self, signing: &SigningArgs) -> Result<OracleSdk, CliError> {
        Ok(OracleSdk::new(self.client(), self.signing_env(signing))?)
    }

    /// Token client
    pub fn token(&self) -> Result<TokenSdk, CliError> {
        Ok(TokenSdk::new(self.client(), self.env.clone())?)
    }

    /// Report a submitted transaction
    pub fn transacted(&self, message: &str, result: &TransactResult) {
        Output::new(self.json)
            .field_value("success", json!(true))
            .field("transaction_id", &result.transaction_id.to_string())
            .message(message)
            .print();
    }

    /// Report a failed operation: `context: message` on stderr, or an error
    /// object in JSON mode
    pub fn failed(&self, context: &str, err: &SdkError) {
        let message = extract_error_details(err).unwrap_or_else(|| err.to_string());
        if self.json {
            Output::new(true).field_value("success", json!(false)).field("error", &message).print();
        } else {
            eprintln!("{context}: {message}");
        }
    }
}
