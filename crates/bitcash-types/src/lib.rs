//! # bitcash-types
//!
//! Actions and transactions as submitted to the chain.
//!
//! A [`Transaction`] carries a [`TransactionHeader`] that bounds its lifetime
//! and ties it to a recent irreversible block, plus the [`Action`]s to run.
//! Signing covers `sha256(chain_id || packed transaction || context-free
//! data hash)`; the signed result is submitted as a [`PackedTransaction`].

#![warn(missing_docs)]
#![warn(clippy::all)]

mod action;
mod hex_bytes;
mod transaction;

pub use action::Action;
pub use transaction::{
    PackedTransaction, SignedTransaction, Transaction, TransactionExtension, TransactionHeader,
};
