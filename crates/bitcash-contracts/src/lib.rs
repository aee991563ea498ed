//! # bitcash-contracts
//!
//! Typed bindings for the BitCash contracts, generated from their ABIs:
//!
//! - [`accounts`]: `accounts.bk`, account registration and referrals
//! - [`bank`]: `bank.bk`, spot/margin positions, stable tokens and order books
//! - [`delphioracle`]: the price oracle, plus [`OracleSdk`]
//! - [`token`]: `token.bk`, plus [`TokenSdk`]
//!
//! Each module exposes its records, a `TableName` enum, a `Contract`
//! wrapper and the decoded ABI.
//!
//! ```rust,no_run
//! use bitcash_contracts::{delphioracle::Quote, OracleSdk};
//! use bitcash_sdk::Environment;
//!
//! # async fn run() -> Result<(), bitcash_sdk::SdkError> {
//! let env = Environment::from_env()?;
//! let oracle = OracleSdk::new(env.client(), env)?;
//! let owner = "alice".parse()?;
//! let quote = Quote::scaled("btcusd".parse()?, 64250.5, 4)?;
//! oracle.write_oracle_data(owner, vec![quote]).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

#[macro_use]
mod macros;

pub mod accounts;
pub mod bank;
pub mod delphioracle;
pub mod token;

pub use delphioracle::OracleSdk;
pub use token::TokenSdk;
