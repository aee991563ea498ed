//! Oracle SDK tests against a mock node

use bitcash_contracts::delphioracle::{self, PairInput, Quote, RegUser, TableQuery, TableQueryResult, Write};
use bitcash_contracts::OracleSdk;
use bitcash_primitives::{Name, UInt64};
use bitcash_sdk::{ApiClient, Environment, MockTransport, ScopeParams};
use bitcash_types::PackedTransaction;
use serde_json::{json, Value};

const WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
const PUSH: &str = "/v1/chain/push_transaction";
const ROWS: &str = "/v1/chain/get_table_rows";
const SCOPES: &str = "/v1/chain/get_table_by_scope";

fn name(s: &str) -> Name {
    s.parse().unwrap()
}

fn setup(private_key: &str) -> (OracleSdk, MockTransport) {
    let mock = MockTransport::new();
    let env = Environment::default().with_private_key(private_key);
    let sdk = OracleSdk::new(ApiClient::with_transport(mock.clone()), env).unwrap();
    (sdk, mock)
}

fn submitted(mock: &MockTransport) -> bitcash_types::Transaction {
    let packed: PackedTransaction = serde_json::from_value(mock.requests_to(PUSH).pop().unwrap()).unwrap();
    packed.transaction().unwrap()
}

fn stats_row(owner: &str) -> Value {
    json!({
        "owner": owner,
        "timestamp": "2024-01-01T00:00:00.000",
        "count": 42,
        "last_claim": "2024-01-02T00:00:00.000",
        "balance": "1.2500 BTC"
    })
}

// ==================== Writes ====================

#[tokio::test]
async fn test_register_user() {
    let (sdk, mock) = setup(WIF);
    let result = sdk.register_user(name("alice")).await.unwrap();
    assert!(!result.signatures.is_empty());

    let trx = submitted(&mock);
    let action = &trx.actions[0];
    assert_eq!(action.account, delphioracle::ACCOUNT);
    assert_eq!(action.name.to_string(), "reguser");
    assert_eq!(action.authorization[0].to_string(), "alice@active");
    assert_eq!(action.decode_data::<RegUser>().unwrap(), RegUser { owner: name("alice") });
}

#[tokio::test]
async fn test_write_oracle_data_scales_quotes() {
    let (sdk, mock) = setup(WIF);
    let quote = Quote::scaled(name("btcusd"), 64250.1234, 4).unwrap();
    sdk.write_oracle_data(name("alice"), vec![quote]).await.unwrap();

    let data: Write = submitted(&mock).actions[0].decode_data().unwrap();
    assert_eq!(data.quotes.len(), 1);
    assert_eq!(data.quotes[0].value, UInt64(642501234));
    assert_eq!(data.quotes[0].pair, name("btcusd"));
}

#[tokio::test]
async fn test_custom_permission() {
    let mock = MockTransport::new();
    let env = Environment::default().with_private_key(WIF).with_permission("oracle");
    let sdk = OracleSdk::new(ApiClient::with_transport(mock.clone()), env).unwrap();
    sdk.claim_oracle_rewards(name("alice")).await.unwrap();
    assert_eq!(submitted(&mock).actions[0].authorization[0].to_string(), "alice@oracle");
}

#[tokio::test]
async fn test_new_pair_and_delete_pair() {
    let (sdk, mock) = setup(WIF);
    let pair = PairInput {
        name: name("btcusd"),
        base_symbol: "8,BTC".parse().unwrap(),
        base_type: 4,
        base_contract: Name::default(),
        quote_symbol: "2,USD".parse().unwrap(),
        quote_type: 1,
        quote_contract: Name::default(),
        quoted_precision: UInt64(4),
    };
    sdk.create_new_pair(name("bob"), pair.clone()).await.unwrap();
    let action = &submitted(&mock).actions[0];
    assert_eq!(action.name.to_string(), "newbounty");
    assert_eq!(action.authorization[0].actor, name("bob"));
    let data: delphioracle::NewBounty = action.decode_data().unwrap();
    assert_eq!(data.pair, pair);

    sdk.delete_pair(name("alice"), name("btcusd"), "duplicate").await.unwrap();
    let action = &submitted(&mock).actions[0];
    let data: delphioracle::DeletePair = action.decode_data().unwrap();
    assert_eq!(data.name, name("btcusd"));
    assert_eq!(data.reason, "duplicate");
    assert_eq!(action.authorization[0].actor, name("alice"));
}

#[tokio::test]
async fn test_write_requires_private_key() {
    let (sdk, mock) = setup("");
    let err = sdk.register_user(name("alice")).await.unwrap_err();
    assert_eq!(err.to_string(), "Private key is required");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_node_rejection_message() {
    let (sdk, mock) = setup(WIF);
    mock.set_error(
        PUSH,
        500,
        json!({
            "code": 500,
            "message": "Internal Service Error",
            "error": {
                "what": "eosio_assert_message assertion failure",
                "details": [{"message": "assertion failure with message: already voted"}]
            }
        }),
    );
    let err = sdk.vote_bounty(name("alice"), name("btcusd")).await.unwrap_err();
    assert_eq!(err.to_string(), "assertion failure with message: already voted");
    assert!(err.rpc_body().is_some());
}

// ==================== Reads ====================

#[tokio::test]
async fn test_get_oracle_stats() {
    let (sdk, mock) = setup("");
    mock.push_response(ROWS, json!({"rows": [stats_row("alice")], "more": false}));
    let stats = sdk.get_oracle_stats(name("alice")).await.unwrap().unwrap();
    assert_eq!(stats.count, UInt64(42));
    assert_eq!(stats.balance.to_string(), "1.2500 BTC");

    let request = mock.requests_to(ROWS).pop().unwrap();
    assert_eq!(request["table"], "stats");
    assert_eq!(request["scope"], "delphioracle");
    assert_eq!(request["lower_bound"], "alice");
    assert_eq!(request["upper_bound"], "alice");
    assert_eq!(request["limit"], 1);

    mock.push_response(ROWS, json!({"rows": [], "more": false}));
    assert!(sdk.get_oracle_stats(name("carol")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_read_failure_uses_fallback() {
    let (sdk, mock) = setup("");
    mock.set_error(ROWS, 502, Value::Null);
    let err = sdk.get_all_pairs().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch pairs");
}

#[tokio::test]
async fn test_read_table_unknown_table() {
    let (sdk, mock) = setup("");
    let err = sdk.read_table_data(&TableQuery::new("nosuch")).await.unwrap_err();
    assert_eq!(err.to_string(), "Table 'nosuch' does not exist in contract");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_read_table_by_key() {
    let (sdk, mock) = setup("");
    mock.push_response(ROWS, json!({"rows": [stats_row("alice")], "more": false}));
    let query = TableQuery { primary_key: Some("alice".into()), ..TableQuery::new("stats") };
    match sdk.read_table_data(&query).await.unwrap() {
        TableQueryResult::Row(Some(row)) => assert_eq!(row["owner"], "alice"),
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn test_read_table_paginated() {
    let (sdk, mock) = setup("");
    mock.push_response(
        ROWS,
        json!({"rows": [{"name": "a"}, {"name": "b"}], "more": true, "next_key": "c"}),
    );
    let query = TableQuery {
        scope: Some("bob".into()),
        limit: Some(2),
        paginate: true,
        ..TableQuery::new("users")
    };
    let result = sdk.read_table_data(&query).await.unwrap();
    let TableQueryResult::Page(page) = result else {
        panic!("expected a page");
    };
    assert!(page.has_more);
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.table_name, "users");
    assert_eq!(page.query_params.limit, Some(2));

    let requests = mock.requests_to(ROWS);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["scope"], "bob");
    assert_eq!(requests[0]["limit"], 2);
}

#[tokio::test]
async fn test_query_table_all_rows() {
    let (sdk, mock) = setup("");
    mock.push_response(ROWS, json!({"rows": [{"id": 0}], "more": true, "next_key": "1"}));
    mock.push_response(ROWS, json!({"rows": [{"id": 1}], "more": false, "next_key": ""}));
    let query = TableQuery { reverse: false, lower_bound: Some("0".into()), ..TableQuery::new("datapoints") };
    let result = sdk.query_table_data(&query).await.unwrap();
    assert_eq!(result.rows().len(), 2);
    assert!(matches!(result, TableQueryResult::Rows { ref table_name, .. } if table_name == "datapoints"));

    let requests = mock.requests_to(ROWS);
    assert_eq!(requests[1]["lower_bound"], "1");
}

#[tokio::test]
async fn test_get_table_scopes() {
    let (sdk, mock) = setup("");
    mock.push_response(
        SCOPES,
        json!({"rows": [
            {"code": "delphioracle", "scope": "btcusd", "table": "datapoints", "payer": "alice", "count": 21}
        ], "more": ""}),
    );
    let scopes = sdk.get_table_scopes("datapoints", ScopeParams::default()).await.unwrap();
    assert_eq!(scopes.len(), 1);
    assert_eq!(scopes[0].scope, "btcusd");
    let request = mock.requests_to(SCOPES).pop().unwrap();
    assert_eq!(request["table"], "datapoints");
    assert_eq!(request["limit"], 100);

    let err = sdk.get_table_scopes("nosuch", ScopeParams::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Table 'nosuch' does not exist in contract");
}
