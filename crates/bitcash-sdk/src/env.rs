//! Process environment defaults

use std::fmt;

use bitcash_primitives::{Checksum256, Name};
use zeroize::Zeroizing;

use crate::SdkError;

/// Default oracle contract account
pub const DEFAULT_ORACLE_CONTRACT: &str = "delphioracle";
/// Default token contract account
pub const DEFAULT_TOKEN_CONTRACT: &str = "token.bk";
/// Default node endpoint
pub const DEFAULT_RPC_ENDPOINT: &str = "https://api.np.animus.is";
/// Default signing permission
pub const DEFAULT_PERMISSION: &str = "active";
/// Default chain id
pub const DEFAULT_CHAIN_ID: &str = "e28174b34639a5ba006265f3641c8ffc1021d65c4cd12fbf242e5c6a6fde6a55";

/// Defaults for contract accounts, endpoint, signing key and chain
///
/// Read from `ORACLE_CONTRACT`, `TOKEN_CONTRACT`, `RPC_ENDPOINT`,
/// `PRIVATE_KEY`, `PERMISSION`, `CHAIN_ID` and `DEBUG`. Unset or empty
/// variables take the defaults.
#[derive(Clone)]
pub struct Environment {
    /// Oracle contract account
    pub oracle_contract: Name,
    /// Token contract account
    pub token_contract: Name,
    /// Node endpoint
    pub rpc_endpoint: String,
    /// Signing key text, empty when unset
    pub private_key: Zeroizing<String>,
    /// Signing permission
    pub permission: String,
    /// Chain id
    pub chain_id: Checksum256,
    /// Verbose logging requested
    pub debug: bool,
}

impl Environment {
    /// Read the process environment
    pub fn from_env() -> Result<Self, SdkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SdkError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut env = Self::default();

        if let Some(v) = var("ORACLE_CONTRACT") {
            env.oracle_contract = v.parse().map_err(|e| SdkError::Config(format!("ORACLE_CONTRACT: {e}")))?;
        }
        if let Some(v) = var("TOKEN_CONTRACT") {
            env.token_contract = v.parse().map_err(|e| SdkError::Config(format!("TOKEN_CONTRACT: {e}")))?;
        }
        if let Some(v) = var("RPC_ENDPOINT") {
            env.rpc_endpoint = v;
        }
        if let Some(v) = var("PRIVATE_KEY") {
            env.private_key = Zeroizing::new(v);
        }
        if let Some(v) = var("PERMISSION") {
            env.permission = v;
        }
        if let Some(v) = var("CHAIN_ID") {
            env.chain_id = v.parse().map_err(|e| SdkError::Config(format!("CHAIN_ID: {e}")))?;
        }
        env.debug = var("DEBUG").as_deref() == Some("true");

        Ok(env)
    }

    /// Override the endpoint
    pub fn with_rpc_endpoint(mut self, url: impl Into<String>) -> Self {
        self.rpc_endpoint = url.into();
        self
    }

    /// Override the signing key
    pub fn with_private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key = Zeroizing::new(key.into());
        self
    }

    /// Override the permission
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    /// Override the chain id
    pub fn with_chain_id(mut self, chain_id: Checksum256) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// HTTP client for the configured endpoint
    #[cfg(feature = "http")]
    pub fn client(&self) -> crate::ApiClient {
        crate::ApiClient::new(&self.rpc_endpoint)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            oracle_contract: Name::from_static(DEFAULT_ORACLE_CONTRACT),
            token_contract: Name::from_static(DEFAULT_TOKEN_CONTRACT),
            rpc_endpoint: DEFAULT_RPC_ENDPOINT.to_string(),
            private_key: Zeroizing::new(String::new()),
            permission: DEFAULT_PERMISSION.to_string(),
            chain_id: Checksum256::from_bytes(DEFAULT_CHAIN_ID_BYTES),
            debug: false,
        }
    }
}

const DEFAULT_CHAIN_ID_BYTES: [u8; 32] = [
    0xe2, 0x81, 0x74, 0xb3, 0x46, 0x39, 0xa5, 0xba, 0x00, 0x62, 0x65, 0xf3, 0x64, 0x1c, 0x8f, 0xfc, 0x10, 0x21, 0xd6,
    0x5c, 0x4c, 0xd1, 0x2f, 0xbf, 0x24, 0x2e, 0x5c, 0x6a, 0x6f, 0xde, 0x6a, 0x55,
];

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("oracle_contract", &self.oracle_contract)
            .field("token_contract", &self.token_contract)
            .field("rpc_endpoint", &self.rpc_endpoint)
            .field("private_key", &if self.private_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("permission", &self.permission)
            .field("chain_id", &self.chain_id)
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let env = Environment::from_lookup(lookup(&[])).unwrap();
        assert_eq!(env.oracle_contract.to_string(), DEFAULT_ORACLE_CONTRACT);
        assert_eq!(env.token_contract.to_string(), DEFAULT_TOKEN_CONTRACT);
        assert_eq!(env.rpc_endpoint, DEFAULT_RPC_ENDPOINT);
        assert_eq!(env.permission, "active");
        assert_eq!(env.chain_id.to_hex(), DEFAULT_CHAIN_ID);
        assert!(env.private_key.is_empty());
        assert!(!env.debug);
    }

    #[test]
    fn test_overrides_and_empty_values() {
        let env = Environment::from_lookup(lookup(&[
            ("ORACLE_CONTRACT", "oracle.bk"),
            ("RPC_ENDPOINT", "http://127.0.0.1:8888"),
            ("PERMISSION", ""),
            ("DEBUG", "true"),
        ]))
        .unwrap();
        assert_eq!(env.oracle_contract.to_string(), "oracle.bk");
        assert_eq!(env.rpc_endpoint, "http://127.0.0.1:8888");
        assert_eq!(env.permission, "active");
        assert!(env.debug);
    }

    #[test]
    fn test_debug_only_when_true() {
        let env = Environment::from_lookup(lookup(&[("DEBUG", "1")])).unwrap();
        assert!(!env.debug);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Environment::from_lookup(lookup(&[("CHAIN_ID", "abc")])),
            Err(SdkError::Config(msg)) if msg.starts_with("CHAIN_ID")
        ));
        assert!(Environment::from_lookup(lookup(&[("ORACLE_CONTRACT", "delphioracle.bk")])).is_err());
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let env = Environment::default().with_private_key("5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3");
        let text = format!("{env:?}");
        assert!(text.contains("<redacted>"));
        assert!(!text.contains("5KQw"));
    }
}
