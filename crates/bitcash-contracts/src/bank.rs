//! Bindings for the `bank.bk` contract: spot, margin, stable token and
//! P2P/GEM order books.

#![allow(missing_docs)]

use bitcash_codec::abi_struct;
use bitcash_primitives::{Asset, ExtendedAsset, ExtendedSymbol, Name, TimePointSec, UInt64};

/// Base64 of the contract's binary ABI
pub const ABI_BLOB: &str = include_str!("../abi/bank.bk.abi.b64");

abi_struct! {
    /// List a crypto token
    pub struct AddCryptoToken = "add_crypto_token" {
        pub token: ExtendedSymbol => "extended_symbol",
        pub min_hedge_limit: ExtendedAsset => "extended_asset",
        pub hedge_amount: ExtendedAsset => "extended_asset",
        pub delphi_usd_scope: Name => "name",
        pub loan_fee: Asset => "asset",
        pub withdraw_equal_fee: ExtendedAsset => "extended_asset",
        pub is_stable_token: bool => "bool",
    }

    /// List a forex pair
    pub struct AddForexPair = "add_forex_pair" {
        pub base_token: ExtendedSymbol => "extended_symbol",
        pub quote_token: ExtendedSymbol => "extended_symbol",
        pub delphi_scope: Name => "name",
        pub exchange_fee: Asset => "asset",
    }

    /// List a crypto/stable pair
    pub struct AddPair = "add_pair" {
        pub crypto_token: ExtendedSymbol => "extended_symbol",
        pub stable_token: ExtendedSymbol => "extended_symbol",
        pub delphi_scope: Name => "name",
        pub deposit_fee: Asset => "asset",
        pub exchange_fee: Asset => "asset",
    }

    /// List a stable token
    pub struct AddStableToken = "add_stable_token" {
        pub token: ExtendedSymbol => "extended_symbol",
    }

    /// Place a GEM buy order
    pub struct BuyGem = "buy_gem" {
        pub buyer: Name => "name",
        pub quantity: ExtendedAsset => "extended_asset",
    }

    /// Cancel a GEM buy order
    pub struct CancelBuyGem = "cancel_buy_gem" {
        pub buyer: Name => "name",
        pub id: UInt64 => "uint64",
    }

    /// Cancel a P2P sell order
    pub struct CancelP2p = "cancel_p2p" {
        pub seller: Name => "name",
        pub id: UInt64 => "uint64",
    }

    /// Cancel a GEM sell order
    pub struct CancelSellGem = "cancel_sell_gem" {
        pub seller: Name => "name",
        pub id: UInt64 => "uint64",
    }

    /// Row of `config`
    pub struct ConfigRow = "config_row" {
        pub total_deposit_limit: ExtendedAsset => "extended_asset",
        pub account_deposit_limit: ExtendedAsset => "extended_asset",
        pub current_ltv_level: UInt64 => "uint64",
        pub is_paused: bool => "bool",
    }

    /// Confirm a P2P order as buyer
    pub struct ConfirmP2p = "confirm_p2p" {
        pub seller: Name => "name",
        pub buyer: Name => "name",
        pub id: UInt64 => "uint64",
    }

    /// Row of `cryptotokens`
    pub struct CryptoToken = "crypto_token" {
        pub id: UInt64 => "uint64",
        pub total_spot: ExtendedAsset => "extended_asset",
        pub min_hedge_limit: ExtendedAsset => "extended_asset",
        pub hedge_amount: ExtendedAsset => "extended_asset",
        pub delphi_usd_scope: Name => "name",
        pub loan_fee: Asset => "asset",
        pub withdraw_equal_fee: ExtendedAsset => "extended_asset",
        pub is_stable_token: bool => "bool",
        pub is_withdraw_paused: bool => "bool",
    }

    /// Move crypto between accounts
    pub struct CryptoTransfer = "crypto_transfer" {
        pub from: Name => "name",
        pub to: Name => "name",
        pub pair_id: UInt64 => "uint64",
        pub quantity: ExtendedAsset => "extended_asset",
        pub memo: String => "string",
    }

    /// Crypto withdrawal notification
    pub struct CryptoWithdrawLog = "crypto_withdraw_log" {
        pub account: Name => "name",
        pub pair_id: UInt64 => "uint64",
        pub quantity: ExtendedAsset => "extended_asset",
        pub fee: ExtendedAsset => "extended_asset",
    }

    /// Deposit notification
    pub struct DepositLog = "deposit_log" {
        pub from: Name => "name",
        pub crypto_quantity: ExtendedAsset => "extended_asset",
        pub memo: String => "string",
        pub bitcash_quantity: ExtendedAsset => "extended_asset",
    }

    /// Fill a GEM buy order
    pub struct FillBuyGem = "fill_buy_gem" {
        pub buyer: Name => "name",
        pub id: UInt64 => "uint64",
    }

    /// Fill a GEM sell order
    pub struct FillSellGem = "fill_sell_gem" {
        pub seller: Name => "name",
        pub id: UInt64 => "uint64",
    }

    /// Row of `forexpairs`
    pub struct ForexPair = "forex_pair" {
        pub id: UInt64 => "uint64",
        pub base_token: ExtendedSymbol => "extended_symbol",
        pub quote_token: ExtendedSymbol => "extended_symbol",
        pub delphi_scope: Name => "name",
        pub exchange_fee: Asset => "asset",
        pub is_trading_paused: bool => "bool",
    }

    /// Trade a forex pair
    pub struct ForexTrade = "forex_trade" {
        pub account: Name => "name",
        pub pair_id: UInt64 => "uint64",
        pub quantity: ExtendedAsset => "extended_asset",
    }

    /// Forex trade notification
    pub struct ForexTradeLog = "forex_trade_log" {
        pub account: Name => "name",
        pub pair_id: UInt64 => "uint64",
        pub amount_in: ExtendedAsset => "extended_asset",
        pub amount_out: ExtendedAsset => "extended_asset",
        pub unit_price: ExtendedAsset => "extended_asset",
        pub fee: ExtendedAsset => "extended_asset",
    }

    /// Row of `buygemsords` and `sellgemsords`
    pub struct GemOrder = "gem_order" {
        pub id: UInt64 => "uint64",
        pub quantity: ExtendedAsset => "extended_asset",
    }

    /// Row of `glbtotalcoll` and `glbtotalloan`
    pub struct Global = "global" {
        pub id: UInt64 => "uint64",
        pub total: ExtendedAsset => "extended_asset",
    }

    /// Row of `glbpaircoll` and `glbpairloan`
    pub struct GlobalPairValue = "global_pair_value" {
        pub pair_id: UInt64 => "uint64",
        pub crypto_balance: ExtendedAsset => "extended_asset",
        pub stable_balance: ExtendedAsset => "extended_asset",
    }

    /// Row of `glbttlcollv2`, `glbttlloanv2` and `stbltokensv2`
    pub struct GlobalRow = "global_row" {
        pub total: ExtendedAsset => "extended_asset",
    }

    /// Row of `limits`
    pub struct Limit = "limit" {
        pub max_range: ExtendedAsset => "extended_asset",
        pub max_value: ExtendedAsset => "extended_asset",
        pub fee: ExtendedAsset => "extended_asset",
    }

    /// Long trade notification
    pub struct LongTradeLog = "long_trade_log" {
        pub account: Name => "name",
        pub quantity: ExtendedAsset => "extended_asset",
        pub price: ExtendedAsset => "extended_asset",
    }

    /// Row of `ltvlevels`
    pub struct LtvLevel = "ltv_level" {
        pub level: UInt64 => "uint64",
        pub max_user_ratio: Asset => "asset",
        pub target_user_ratio: Asset => "asset",
        pub min_global_ratio: Asset => "asset",
        pub max_global_ratio: Asset => "asset",
    }

    /// Row of `ltvdaily` and `ltvhourly`
    pub struct LtvRowEntry = "ltv_row_entry" {
        pub id: UInt64 => "uint64",
        pub ltv_ratio: Asset => "asset",
        pub date: TimePointSec => "time_point_sec",
    }

    /// Row of `ltvevent`
    pub struct LtvRowEvent = "ltv_row_event" {
        pub id: UInt64 => "uint64",
        pub next_level: UInt64 => "uint64",
        pub date: TimePointSec => "time_point_sec",
    }

    /// Migrate `pairs` into `spotpairsv2`
    pub struct MigrateSpotPairs = "migrate_spot_pairs" {
    }

    /// Migrate the spot positions of an account
    pub struct MigrateSpotPositions = "migrate_spot_positions" {
        pub account: Name => "name",
    }

    /// Migrate `stabletokens` into `stbltokensv2`
    pub struct MigrateStableTokens = "migrate_stable_tokens" {
    }

    /// Update a crypto token
    pub struct ModifyCryptoToken = "modify_crypto_token" {
        pub token: ExtendedSymbol => "extended_symbol",
        pub delphi_usd_scope: Name => "name",
        pub loan_fee: Asset => "asset",
        pub withdraw_equal_fee: ExtendedAsset => "extended_asset",
        pub is_withdraw_paused: bool => "bool",
    }

    /// Update a forex pair
    pub struct ModifyForexPair = "modify_forex_pair" {
        pub base_token: ExtendedSymbol => "extended_symbol",
        pub quote_token: ExtendedSymbol => "extended_symbol",
        pub exchange_fee: Asset => "asset",
        pub is_trading_paused: bool => "bool",
    }

    /// Update a pair
    pub struct ModifyPair = "modify_pair" {
        pub crypto_token: ExtendedSymbol => "extended_symbol",
        pub stable_token: ExtendedSymbol => "extended_symbol",
        pub deposit_fee: Asset => "asset",
        pub exchange_fee: Asset => "asset",
        pub is_deposit_paused: bool => "bool",
        pub is_trading_paused: bool => "bool",
    }

    /// Row of `p2porders`
    pub struct Order = "order" {
        pub id: UInt64 => "uint64",
        pub quantity: ExtendedAsset => "extended_asset",
        pub fee: ExtendedAsset => "extended_asset",
    }

    /// Row of `pairs`
    pub struct Pair = "pair" {
        pub id: UInt64 => "uint64",
        pub crypto_token: ExtendedSymbol => "extended_symbol",
        pub stable_token: ExtendedSymbol => "extended_symbol",
        pub delphi_scope: Name => "name",
        pub exchange_fee: Asset => "asset",
        pub is_deposit_paused: bool => "bool",
        pub is_trading_paused: bool => "bool",
    }

    /// Pause the contract
    pub struct Pause = "pause" {
    }

    /// Row of `spot`
    pub struct Position = "position" {
        pub pair_id: UInt64 => "uint64",
        pub balance: ExtendedAsset => "extended_asset",
        pub balance_blocked: ExtendedAsset => "extended_asset",
        pub last_withdraw_date: TimePointSec => "time_point_sec",
    }

    /// Row of `marginv2` and `spotv2`
    pub struct PositionV2Row = "position_v2_row" {
        pub pair_id: UInt64 => "uint64",
        pub balance: ExtendedAsset => "extended_asset",
        pub balance_blocked: ExtendedAsset => "extended_asset",
    }

    /// Place a GEM sell order
    pub struct SellGem = "sell_gem" {
        pub seller: Name => "name",
        pub quantity: ExtendedAsset => "extended_asset",
    }

    /// Place a P2P sell order
    pub struct SellP2p = "sell_p2p" {
        pub seller: Name => "name",
        pub quantity: ExtendedAsset => "extended_asset",
        pub fee: ExtendedAsset => "extended_asset",
    }

    /// P2P sale notification
    pub struct SellP2pLog = "sell_p2p_log" {
        pub seller: Name => "name",
        pub quantity: ExtendedAsset => "extended_asset",
        pub fee: ExtendedAsset => "extended_asset",
        pub id: UInt64 => "uint64",
    }

    /// Set deposit limits
    pub struct SetConfig = "set_config" {
        pub total_deposit_limit: ExtendedAsset => "extended_asset",
        pub account_deposit_limit: ExtendedAsset => "extended_asset",
    }

    /// Set a loan-to-value level
    pub struct SetLtvLevel = "set_ltv_level" {
        pub level: UInt64 => "uint64",
        pub max_user_ratio: Asset => "asset",
        pub target_user_ratio: Asset => "asset",
        pub min_global_ratio: Asset => "asset",
        pub max_global_ratio: Asset => "asset",
    }

    /// Set withdrawal limits
    pub struct SetWithdrawLimit = "set_withdraw_limit" {
        pub max_range: ExtendedAsset => "extended_asset",
        pub max_value: ExtendedAsset => "extended_asset",
        pub fee: ExtendedAsset => "extended_asset",
    }

    /// Short trade notification
    pub struct ShortTradeLog = "short_trade_log" {
        pub account: Name => "name",
        pub quantity: ExtendedAsset => "extended_asset",
        pub price: ExtendedAsset => "extended_asset",
    }

    /// Row of `spotpairsv2`
    pub struct SpotPairV2Row = "spot_pair_v2_row" {
        pub id: UInt64 => "uint64",
        pub crypto_token: ExtendedSymbol => "extended_symbol",
        pub stable_token: ExtendedSymbol => "extended_symbol",
        pub delphi_scope: Name => "name",
        pub deposit_fee: Asset => "asset",
        pub exchange_fee: Asset => "asset",
        pub is_deposit_paused: bool => "bool",
        pub is_trading_paused: bool => "bool",
    }

    /// Row of `stable`
    pub struct SpotStablePosition = "spot_stable_position" {
        pub id: UInt64 => "uint64",
        pub balance: ExtendedAsset => "extended_asset",
    }

    /// Row of `stablev2`
    pub struct SpotStablePositionV2 = "spot_stable_position_v2" {
        pub balance: ExtendedAsset => "extended_asset",
        pub balance_blocked: ExtendedAsset => "extended_asset",
    }

    /// Row of `stabletokens`
    pub struct StableToken = "stable_token" {
        pub id: UInt64 => "uint64",
        pub total_spot: ExtendedAsset => "extended_asset",
    }

    /// Move stable tokens between accounts
    pub struct StableTransfer = "stable_transfer" {
        pub from: Name => "name",
        pub to: Name => "name",
        pub quantity: ExtendedAsset => "extended_asset",
        pub memo: String => "string",
    }

    /// Stable withdrawal notification
    pub struct StableWithdrawLog = "stable_withdraw_log" {
        pub account: Name => "name",
        pub quantity: ExtendedAsset => "extended_asset",
        pub fee: ExtendedAsset => "extended_asset",
        pub receive_quantity: ExtendedAsset => "extended_asset",
    }

    /// Resume the contract
    pub struct Unpause = "unpause" {
    }

    /// Withdraw crypto
    pub struct Withdraw = "withdraw" {
        pub account: Name => "name",
        pub pair_id: UInt64 => "uint64",
        pub quantity: ExtendedAsset => "extended_asset",
    }

    /// Row of `wdlperiods`
    pub struct WithdrawPeriod = "withdraw_period" {
        pub account: Name => "name",
        pub updated_at: TimePointSec => "time_point_sec",
    }

    /// Withdraw stable tokens
    pub struct WithdrawStable = "withdraw_stable" {
        pub account: Name => "name",
        pub quantity: ExtendedAsset => "extended_asset",
    }
}

contract_bindings! {
    account: "bank.bk",
    actions {
        AddCryptoToken => "addcrptoken",
        AddForexPair => "addforexpair",
        AddPair => "addpair",
        AddStableToken => "addstbtoken",
        BuyGem => "buygem",
        CancelP2p => "cancelp2p",
        CancelBuyGem => "cnlbuygem",
        CancelSellGem => "cnlsellgem",
        ConfirmP2p => "confirmp2p",
        CryptoTransfer => "crptransfer",
        CryptoWithdrawLog => "crpwdllog",
        DepositLog => "depositlog",
        FillBuyGem => "fillbuygem",
        FillSellGem => "fillsellgem",
        ForexTrade => "forextrade",
        ForexTradeLog => "fxtrdlog",
        LongTradeLog => "longtrdlog",
        ModifyCryptoToken => "mdfcrptoken",
        ModifyForexPair => "mdfforexpair",
        ModifyPair => "mdfpair",
        MigrateSpotPairs => "mgrspotpairs",
        MigrateSpotPositions => "mgrspotpos",
        MigrateStableTokens => "mgrstbtkns",
        Pause => "pause",
        SellGem => "sellgem",
        SellP2p => "sellp2p",
        SellP2pLog => "sellp2plog",
        SetConfig => "setconfig",
        SetLtvLevel => "setltvlevel",
        SetWithdrawLimit => "setwdlmt",
        ShortTradeLog => "shorttrdlog",
        StableTransfer => "stbtransfer",
        StableWithdrawLog => "stbwdllog",
        Unpause => "unpause",
        Withdraw => "withdraw",
        WithdrawStable => "withdrawstbl",
    }
    tables {
        BuyGemsOrds => "buygemsords": GemOrder,
        Config => "config": ConfigRow,
        CryptoTokens => "cryptotokens": CryptoToken,
        ForexPairs => "forexpairs": ForexPair,
        GlbPairColl => "glbpaircoll": GlobalPairValue,
        GlbPairLoan => "glbpairloan": GlobalPairValue,
        GlbTotalColl => "glbtotalcoll": Global,
        GlbTotalLoan => "glbtotalloan": Global,
        GlbTtlCollV2 => "glbttlcollv2": GlobalRow,
        GlbTtlLoanV2 => "glbttlloanv2": GlobalRow,
        Limits => "limits": Limit,
        LtvDaily => "ltvdaily": LtvRowEntry,
        LtvEvent => "ltvevent": LtvRowEvent,
        LtvHourly => "ltvhourly": LtvRowEntry,
        LtvLevels => "ltvlevels": LtvLevel,
        MarginV2 => "marginv2": PositionV2Row,
        P2pOrders => "p2porders": Order,
        Pairs => "pairs": Pair,
        SellGemsOrds => "sellgemsords": GemOrder,
        Spot => "spot": Position,
        SpotPairsV2 => "spotpairsv2": SpotPairV2Row,
        SpotV2 => "spotv2": PositionV2Row,
        Stable => "stable": SpotStablePosition,
        StableTokens => "stabletokens": StableToken,
        StableV2 => "stablev2": SpotStablePositionV2,
        StblTokensV2 => "stbltokensv2": GlobalRow,
        WdlPeriods => "wdlperiods": WithdrawPeriod,
    }
    records {}
}


#[cfg(test)]
mod tests {
    use super::*;
    use bitcash_sdk::{ActionOptions, ApiClient};

    #[test]
    fn test_withdraw_action_layout() {
        let contract = Contract::new(ApiClient::new_mock()).unwrap();
        let data = Withdraw {
            account: "alice".parse().unwrap(),
            pair_id: UInt64(1),
            quantity: ExtendedAsset { quantity: "1.0000 BTC".parse().unwrap(), contract: "token.bk".parse().unwrap() },
        };
        let action = contract
            .action(&data, ActionOptions::authorized_by("alice@active".parse().unwrap()))
            .unwrap();
        assert_eq!(action.account.to_string(), "bank.bk");
        assert_eq!(
            hex::encode(&action.data),
            "0000000000855c34010000000000000010270000000000000442544300000000000000f080a920cd"
        );
        assert_eq!(action.decode_data::<Withdraw>().unwrap(), data);
    }

    #[test]
    fn test_shared_row_types() {
        assert_eq!(TableName::GlbTtlCollV2.row_type(), "global_row");
        assert_eq!(TableName::StblTokensV2.row_type(), "global_row");
        assert_eq!(TableName::MarginV2.row_type(), TableName::SpotV2.row_type());
        assert_eq!(TableName::ALL.len(), 27);
    }

    #[test]
    fn test_extended_asset_json() {
        let row: GlobalRow = serde_json::from_value(serde_json::json!({
            "total": {"quantity": "12.5000 BTC", "contract": "token.bk"}
        }))
        .unwrap();
        assert_eq!(row.total.quantity.amount(), 125000);
        assert_eq!(row.total.contract.to_string(), "token.bk");
    }
}
