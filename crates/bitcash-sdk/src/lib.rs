//! # bitcash-sdk
//!
//! Rust SDK for BitCash contracts on Antelope chains.
//!
//! ## Features
//!
//! - **ApiClient**: client for the node's `/v1/chain` HTTP API
//! - **Contract**: typed actions and paging table cursors
//! - **Wallet**: key handling and transaction signing
//! - **TxBuilder**: fluent API for building transactions
//! - **Session**: sign and submit actions as one account
//! - **Environment**: endpoint, key and contract defaults from the process environment
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitcash_sdk::{create_transaction, ApiClient, Environment};
//! use bitcash_primitives::Name;
//! use bitcash_types::Action;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let env = Environment::from_env()?;
//!     let client = ApiClient::new(&env.rpc_endpoint);
//!
//!     let info = client.get_info().await?;
//!     println!("Head block: {}", info.head_block_num);
//!
//!     let owner: Name = "alice".parse()?;
//!     let action = Action::new(
//!         env.oracle_contract,
//!         "reguser".parse()?,
//!         vec!["alice@active".parse()?],
//!         &owner,
//!     );
//!     let result = create_transaction(&client, env.chain_id, action, &env.private_key, &env.permission).await?;
//!     println!("Transaction: {}", result.transaction_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Node rejections arrive as [`SdkError::Rpc`] carrying the node's JSON
//! error body. [`extract_error_details`] turns any error into the message
//! a user should see.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod contract;
pub mod env;
pub mod error;
pub mod session;
pub mod transport;
pub mod tx_builder;
pub mod types;
pub mod wallet;

pub use client::ApiClient;
pub use contract::{ActionData, ActionOptions, Contract, QueryParams, ScopeCursor, ScopeParams, Table, TableCursor};
pub use env::Environment;
pub use error::{extract_error_details, SdkError};
pub use session::{create_transaction, create_transaction_with_session, Session, TransactResult};
pub use transport::{MockTransport, Transport};
pub use tx_builder::TxBuilder;
pub use wallet::Wallet;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export commonly used types
pub use bitcash_primitives::{Asset, Checksum256, Name, PermissionLevel, Symbol};
pub use bitcash_types::Action;
