//! Bindings for the `token.bk` standard token contract

pub mod sdk;

use bitcash_codec::abi_struct;
use bitcash_primitives::{Asset, Name, Symbol};

pub use sdk::{TokenInfo, TokenSdk, DEFAULT_TOKEN_PERMISSION};

/// Base64 of the contract's binary ABI
pub const ABI_BLOB: &str = include_str!("../../abi/token.bk.abi.b64");

abi_struct! {
    /// Row of `accounts`: balance of one token held by the scope account
    pub struct Account = "account" {
        /// Balance
        pub balance: Asset => "asset",
    }

    /// Release the zero balance row of `symbol`
    pub struct Close = "close" {
        /// Holder
        pub owner: Name => "name",
        /// Token symbol
        pub symbol: Symbol => "symbol",
    }

    /// Create a token
    pub struct Create = "create" {
        /// Account allowed to issue
        pub issuer: Name => "name",
        /// Supply cap; its symbol defines the token
        pub maximum_supply: Asset => "asset",
    }

    /// Row of `stat`, scoped by symbol code
    pub struct CurrencyStats = "currency_stats" {
        /// Issued supply
        pub supply: Asset => "asset",
        /// Supply cap
        pub max_supply: Asset => "asset",
        /// Issuer
        pub issuer: Name => "name",
    }

    /// Issue new supply
    pub struct Issue = "issue" {
        /// Recipient, must be the issuer
        pub to: Name => "name",
        /// Amount
        pub quantity: Asset => "asset",
        /// Memo
        pub memo: String => "string",
    }

    /// Open a zero balance row paid for by `ram_payer`
    pub struct Open = "open" {
        /// Holder
        pub owner: Name => "name",
        /// Token symbol
        pub symbol: Symbol => "symbol",
        /// RAM payer
        pub ram_payer: Name => "name",
    }

    /// Remove supply from circulation
    pub struct Retire = "retire" {
        /// Amount
        pub quantity: Asset => "asset",
        /// Memo
        pub memo: String => "string",
    }

    /// Move tokens between accounts
    pub struct Transfer = "transfer" {
        /// Sender
        pub from: Name => "name",
        /// Recipient
        pub to: Name => "name",
        /// Amount
        pub quantity: Asset => "asset",
        /// Memo
        pub memo: String => "string",
    }
}

contract_bindings! {
    account: "token.bk",
    actions {
        Close => "close",
        Create => "create",
        Issue => "issue",
        Open => "open",
        Retire => "retire",
        Transfer => "transfer",
    }
    tables {
        Accounts => "accounts": Account,
        Stat => "stat": CurrencyStats,
    }
    records {}
}
