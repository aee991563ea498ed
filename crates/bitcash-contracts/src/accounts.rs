//! Bindings for the `accounts.bk` contract: account registration and
//! referrals.

#![allow(missing_docs)]

use bitcash_codec::abi_struct;
use bitcash_primitives::{Checksum256, Name};

/// Base64 of the contract's binary ABI
pub const ABI_BLOB: &str = include_str!("../abi/accounts.bk.abi.b64");

abi_struct! {
    /// Row of `accounts`: an account and who referred it
    pub struct Account = "account" {
        pub name: Name => "name",
        pub referrer: Name => "name",
    }

    /// Row of `accountsv2`: account, referrer and recovery id
    pub struct AccountV2 = "accountv2" {
        pub account: Name => "name",
        pub referrer: Name => "name",
        pub recovery_id: Checksum256 => "checksum256",
    }

    /// Record a login
    pub struct Login = "login" {
        pub account: Name => "name",
    }

    /// Copy `accounts` rows into `accountsv2`
    pub struct MigrateAccounts = "migrate_accounts" {
    }

    /// Register an account with its referrer
    pub struct Reg = "reg" {
        pub account: Name => "name",
        pub referrer: Name => "name",
    }

    /// Clear all registrations
    pub struct Reset = "reset" {
    }

    /// Set the recovery id of an account
    pub struct SetRecoveryId = "set_recovery_id" {
        pub account: Name => "name",
        pub recovery_id: Checksum256 => "checksum256",
    }
}

contract_bindings! {
    account: "accounts.bk",
    actions {
        Login => "login",
        MigrateAccounts => "migrateaccts",
        Reg => "reg",
        Reset => "reset",
        SetRecoveryId => "setrcvrid",
    }
    tables {
        Accounts => "accounts": Account,
        AccountsV2 => "accountsv2": AccountV2,
    }
    records {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcash_sdk::{ActionOptions, ApiClient};

    #[test]
    fn test_reg_action() {
        let contract = Contract::new(ApiClient::new_mock()).unwrap();
        let data = Reg { account: "alice".parse().unwrap(), referrer: "bob".parse().unwrap() };
        let action = contract
            .action(&data, ActionOptions::authorized_by("alice@active".parse().unwrap()))
            .unwrap();
        assert_eq!(action.name.to_string(), "reg");
        assert_eq!(hex::encode(&action.data), "0000000000855c340000000000000e3d");
        assert_eq!(action.decode_data::<Reg>().unwrap(), data);
    }

    #[test]
    fn test_empty_actions_encode_nothing() {
        assert!(bitcash_codec::encode(&Reset {}).is_empty());
        assert!(bitcash_codec::encode(&MigrateAccounts {}).is_empty());
    }

    #[test]
    fn test_accountv2_row_json() {
        let row: AccountV2 = serde_json::from_value(serde_json::json!({
            "account": "alice",
            "referrer": "bob",
            "recovery_id": "0000000000000000000000000000000000000000000000000000000000000001"
        }))
        .unwrap();
        assert_eq!(row.referrer.to_string(), "bob");
        assert!(!row.recovery_id.is_zero());
    }
}
