//! Bindings for the `delphioracle` price oracle contract

#![allow(missing_docs)]

pub mod sdk;

use bitcash_codec::abi_struct;
use bitcash_crypto::PublicKey;
use bitcash_primitives::{Asset, Checksum256, Float64, Int64, Name, Symbol, TimePoint, UInt64};

pub use sdk::{OracleSdk, TablePage, TableQuery, TableQueryResult};

/// Base64 of the contract's binary ABI
pub const ABI_BLOB: &str = include_str!("../../abi/delphioracle.abi.b64");

abi_struct! {
    /// Votes against an oracle flagged as abusive
    pub struct Abusers = "abusers" {
        pub name: Name => "name",
        pub votes: UInt64 => "uint64",
    }

    /// Add a custodian
    pub struct AddCustodian = "addcustodian" {
        pub name: Name => "name",
    }

    /// Aggregated price bar
    pub struct Bars = "bars" {
        pub id: UInt64 => "uint64",
        pub high: UInt64 => "uint64",
        pub low: UInt64 => "uint64",
        pub median: UInt64 => "uint64",
        pub timestamp: TimePoint => "time_point",
    }

    /// Cancel a pair bounty
    pub struct CancelBounty = "cancelbounty" {
        pub name: Name => "name",
        pub reason: String => "string",
    }

    /// Claim accumulated oracle rewards
    pub struct Claim = "claim" {
        pub owner: Name => "name",
    }

    /// Drop the datapoints of a pair
    pub struct Clear = "clear" {
        pub pair: Name => "name",
    }

    /// Set global parameters
    pub struct Configure = "configure" {
        pub g: GlobalInput => "globalinput",
    }

    /// Custodian account
    pub struct Custodians = "custodians" {
        pub name: Name => "name",
    }

    /// Submitted value with the running median
    pub struct Datapoints = "datapoints" {
        pub id: UInt64 => "uint64",
        pub owner: Name => "name",
        pub value: UInt64 => "uint64",
        pub median: UInt64 => "uint64",
        pub timestamp: TimePoint => "time_point",
    }

    /// Remove a custodian
    pub struct DelCustodian = "delcustodian" {
        pub name: Name => "name",
    }

    /// Delete a pair
    pub struct DeletePair = "deletepair" {
        pub name: Name => "name",
        pub reason: String => "string",
    }

    /// Donation towards a pair bounty
    pub struct Donations = "donations" {
        pub id: UInt64 => "uint64",
        pub donator: Name => "name",
        pub pair: Name => "name",
        pub timestamp: TimePoint => "time_point",
        pub amount: Asset => "asset",
    }

    /// Edit a pending pair bounty
    pub struct EditBounty = "editbounty" {
        pub name: Name => "name",
        pub pair: PairInput => "pairinput",
    }

    /// Replace a pair definition
    pub struct EditPair = "editpair" {
        pub pair: Pairs => "pairs",
    }

    /// Give up a committed hash
    pub struct ForfeitHash = "forfeithash" {
        pub owner: Name => "name",
    }

    /// Global parameters and counters
    pub struct Global = "global" {
        pub id: UInt64 => "uint64",
        pub total_datapoints_count: UInt64 => "uint64",
        pub total_claimed: Asset => "asset",
        pub datapoints_per_instrument: UInt64 => "uint64",
        pub bars_per_instrument: UInt64 => "uint64",
        pub vote_interval: UInt64 => "uint64",
        pub write_cooldown: UInt64 => "uint64",
        pub approver_threshold: UInt64 => "uint64",
        pub approving_oracles_threshold: UInt64 => "uint64",
        pub approving_custodians_threshold: UInt64 => "uint64",
        pub minimum_rank: UInt64 => "uint64",
        pub paid: UInt64 => "uint64",
        pub min_bounty_delay: UInt64 => "uint64",
        pub new_bounty_delay: UInt64 => "uint64",
    }

    /// Configurable subset of `global`
    pub struct GlobalInput = "globalinput" {
        pub datapoints_per_instrument: UInt64 => "uint64",
        pub bars_per_instrument: UInt64 => "uint64",
        pub vote_interval: UInt64 => "uint64",
        pub write_cooldown: UInt64 => "uint64",
        pub approver_threshold: UInt64 => "uint64",
        pub approving_oracles_threshold: UInt64 => "uint64",
        pub approving_custodians_threshold: UInt64 => "uint64",
        pub minimum_rank: UInt64 => "uint64",
        pub paid: UInt64 => "uint64",
        pub min_bounty_delay: UInt64 => "uint64",
        pub new_bounty_delay: UInt64 => "uint64",
    }

    /// Commit-reveal record of the multi-party oracle
    pub struct Hashes = "hashes" {
        pub id: UInt64 => "uint64",
        pub owner: Name => "name",
        pub multiparty: Checksum256 => "checksum256",
        pub hash: Checksum256 => "checksum256",
        pub reveal: String => "string",
        pub timestamp: TimePoint => "time_point",
    }

    /// Migrate stored data to the current layout
    pub struct MigrateData = "migratedata" {
    }

    /// Supported network
    pub struct Networks = "networks" {
        pub name: Name => "name",
    }

    /// Propose a pair, opening a bounty for it
    pub struct NewBounty = "newbounty" {
        pub proposer: Name => "name",
        pub pair: PairInput => "pairinput",
    }

    /// Legacy global counters
    pub struct OGlobal = "oglobal" {
        pub id: UInt64 => "uint64",
        pub total_datapoints_count: UInt64 => "uint64",
    }

    /// Pair definition as proposed
    pub struct PairInput = "pairinput" {
        pub name: Name => "name",
        pub base_symbol: Symbol => "symbol",
        /// Asset type of the base
        pub base_type: u16 => "asset_type",
        pub base_contract: Name => "name",
        pub quote_symbol: Symbol => "symbol",
        pub quote_type: u16 => "asset_type",
        pub quote_contract: Name => "name",
        /// Decimal places of quoted values
        pub quoted_precision: UInt64 => "uint64",
    }

    /// Trading pair and its bounty state
    pub struct Pairs = "pairs" {
        pub active: bool => "bool",
        pub bounty_awarded: bool => "bool",
        pub bounty_edited_by_custodians: bool => "bool",
        pub proposer: Name => "name",
        pub name: Name => "name",
        pub bounty_amount: Asset => "asset",
        /// Custodians that approved the bounty
        pub approving_custodians: Vec<Name> => "name[]",
        /// Oracles that approved the bounty
        pub approving_oracles: Vec<Name> => "name[]",
        pub base_symbol: Symbol => "symbol",
        pub base_type: u16 => "asset_type",
        pub base_contract: Name => "name",
        pub quote_symbol: Symbol => "symbol",
        pub quote_type: u16 => "asset_type",
        pub quote_contract: Name => "name",
        pub quoted_precision: UInt64 => "uint64",
    }

    /// Block producer, mirrored from the system contract
    pub struct ProducerInfo = "producer_info" {
        pub owner: Name => "name",
        pub total_votes: Float64 => "float64",
        pub producer_key: PublicKey => "public_key",
        pub is_active: bool => "bool",
        pub url: String => "string",
        pub unpaid_blocks: u32 => "uint32",
        pub last_claim_time: TimePoint => "time_point",
        pub location: u16 => "uint16",
    }

    /// Value reported for one pair, scaled by 10^quoted_precision
    pub struct Quote = "quote" {
        /// Scaled value
        pub value: UInt64 => "uint64",
        pub pair: Name => "name",
    }

    /// Register an oracle
    pub struct RegUser = "reguser" {
        pub owner: Name => "name",
    }

    /// Per-oracle submission statistics
    pub struct Stats = "stats" {
        pub owner: Name => "name",
        pub timestamp: TimePoint => "time_point",
        /// Datapoints submitted
        pub count: UInt64 => "uint64",
        pub last_claim: TimePoint => "time_point",
        /// Unclaimed rewards
        pub balance: Asset => "asset",
    }

    /// Withdraw a bounty vote
    pub struct UnvoteBounty = "unvotebounty" {
        pub owner: Name => "name",
        pub bounty: Name => "name",
    }

    /// Recompute user scores
    pub struct UpdateUsers = "updateusers" {
    }

    /// Registered oracle
    pub struct Users = "users" {
        pub name: Name => "name",
        pub contribution: Asset => "asset",
        pub score: UInt64 => "uint64",
        pub creation_timestamp: TimePoint => "time_point",
    }

    /// Vote against an abusive oracle
    pub struct VoteAbuser = "voteabuser" {
        pub owner: Name => "name",
        pub abuser: Name => "name",
    }

    /// Vote for a pair bounty
    pub struct VoteBounty = "votebounty" {
        pub owner: Name => "name",
        pub bounty: Name => "name",
    }

    /// Voter, mirrored from the system contract
    pub struct VoterInfo = "voter_info" {
        pub owner: Name => "name",
        pub proxy: Name => "name",
        pub producers: Vec<Name> => "name[]",
        pub staked: Int64 => "int64",
        pub last_vote_weight: Float64 => "float64",
        pub proxied_vote_weight: Float64 => "float64",
        pub is_proxy: bool => "bool",
        pub flags1: u32 => "uint32",
        pub reserved2: u32 => "uint32",
        pub reserved3: Asset => "asset",
    }

    /// Submit quotes
    pub struct Write = "write" {
        pub owner: Name => "name",
        pub quotes: Vec<Quote> => "quote[]",
    }

    /// Commit a hash with its reveal string
    pub struct WriteHash = "writehash" {
        pub owner: Name => "name",
        pub hash: Checksum256 => "checksum256",
        pub reveal: String => "string",
    }
}

contract_bindings! {
    account: "delphioracle",
    actions {
        AddCustodian => "addcustodian",
        CancelBounty => "cancelbounty",
        Claim => "claim",
        Clear => "clear",
        Configure => "configure",
        DelCustodian => "delcustodian",
        DeletePair => "deletepair",
        EditBounty => "editbounty",
        EditPair => "editpair",
        ForfeitHash => "forfeithash",
        MigrateData => "migratedata",
        NewBounty => "newbounty",
        RegUser => "reguser",
        UnvoteBounty => "unvotebounty",
        UpdateUsers => "updateusers",
        VoteAbuser => "voteabuser",
        VoteBounty => "votebounty",
        Write => "write",
        WriteHash => "writehash",
    }
    tables {
        Abusers => "abusers": Abusers,
        Bars => "bars": Bars,
        Custodians => "custodians": Custodians,
        Datapoints => "datapoints": Datapoints,
        Donations => "donations": Donations,
        Global => "global": Global,
        Hashes => "hashes": Hashes,
        Networks => "networks": Networks,
        NPairs => "npairs": Pairs,
        OGlobal => "oglobal": OGlobal,
        Pairs => "pairs": Pairs,
        Producers => "producers": ProducerInfo,
        Stats => "stats": Stats,
        Users => "users": Users,
        Voters => "voters": VoterInfo,
    }
    records { GlobalInput, PairInput, Quote }
}


impl Quote {
    /// Scale `value` to `precision` decimal places, rounding to the nearest
    /// integer. Negative or non-finite values are rejected.
    pub fn scaled(pair: Name, value: f64, precision: u32) -> Result<Self, bitcash_sdk::SdkError> {
        let scaled = (value * 10f64.powi(precision as i32)).round();
        if !scaled.is_finite() || scaled < 0.0 || scaled >= u64::MAX as f64 {
            return Err(bitcash_sdk::SdkError::InvalidValue(format!("quote value {value} out of range")));
        }
        Ok(Quote { value: UInt64(scaled as u64), pair })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcash_sdk::{ActionOptions, ApiClient};

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_account() {
        assert_eq!(ACCOUNT.to_string(), "delphioracle");
        assert_eq!(ACCOUNT.as_u64(), 5378237739411055264);
    }

    #[test]
    fn test_write_action_layout() {
        let contract = Contract::new(ApiClient::new_mock()).unwrap();
        let data = Write {
            owner: name("alice"),
            quotes: vec![Quote { value: UInt64(123456), pair: name("btcusd") }],
        };
        let action = contract
            .action(&data, ActionOptions::authorized_by("alice@active".parse().unwrap()))
            .unwrap();
        assert_eq!(action.account, ACCOUNT);
        assert_eq!(hex::encode(&action.data), "0000000000855c340140e20100000000000000000024ac513e");
        assert_eq!(action.decode_data::<Write>().unwrap(), data);
    }

    #[test]
    fn test_quote_scaling() {
        assert_eq!(Quote::scaled(name("btcusd"), 1.23456, 4).unwrap().value, UInt64(12346));
        assert_eq!(Quote::scaled(name("btcusd"), 0.5, 0).unwrap().value, UInt64(1));
        assert!(Quote::scaled(name("btcusd"), -1.0, 4).is_err());
        assert!(Quote::scaled(name("btcusd"), f64::NAN, 4).is_err());
    }

    #[test]
    fn test_quote_scaling_rejects_u64_overflow() {
        assert!(Quote::scaled(name("btcusd"), 2f64.powi(64), 0).is_err());
        assert!(Quote::scaled(name("btcusd"), 2f64.powi(60), 4).is_err());
        assert_eq!(Quote::scaled(name("btcusd"), 2f64.powi(63), 0).unwrap().value, UInt64(1 << 63));
    }

    #[test]
    fn test_pairs_row_json() {
        let row: Pairs = serde_json::from_value(serde_json::json!({
            "active": true,
            "bounty_awarded": false,
            "bounty_edited_by_custodians": false,
            "proposer": "alice",
            "name": "btcusd",
            "bounty_amount": "0.0000 BTC",
            "approving_custodians": [],
            "approving_oracles": ["bob"],
            "base_symbol": "8,BTC",
            "base_type": 4,
            "base_contract": "",
            "quote_symbol": "2,USD",
            "quote_type": 1,
            "quote_contract": "",
            "quoted_precision": 4
        }))
        .unwrap();
        assert_eq!(row.name, name("btcusd"));
        assert_eq!(row.approving_oracles, vec![name("bob")]);
        assert_eq!(row.base_symbol.precision(), 8);
        assert_eq!(row.quoted_precision, UInt64(4));

        let edit = EditPair { pair: row.clone() };
        assert_eq!(edit.pair, row);
        let bytes = bitcash_codec::encode(&edit);
        assert_eq!(bitcash_codec::decode::<EditPair>(&bytes).unwrap(), edit);
    }
}
