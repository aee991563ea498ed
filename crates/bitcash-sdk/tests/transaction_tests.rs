//! Transaction submission tests for bitcash-sdk
//!
//! Tests the signing session and the single-action helpers, including how
//! node rejections are reported.

use bitcash_sdk::{
    create_transaction, create_transaction_with_session, extract_error_details, Action, ApiClient, Checksum256,
    MockTransport, Name, SdkError, Session, Wallet,
};
use bitcash_types::PackedTransaction;
use serde_json::json;

const WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
const PUSH: &str = "/v1/chain/push_transaction";

fn name(s: &str) -> Name {
    s.parse().unwrap()
}

fn chain_id() -> Checksum256 {
    bitcash_sdk::env::DEFAULT_CHAIN_ID.parse().unwrap()
}

fn reguser(auth: Option<&str>) -> Action {
    let authorization = auth.map(|a| vec![a.parse().unwrap()]).unwrap_or_default();
    Action::new(name("delphioracle"), name("reguser"), authorization, &name("alice"))
}

fn submitted(mock: &MockTransport) -> PackedTransaction {
    serde_json::from_value(mock.requests_to(PUSH).pop().unwrap()).unwrap()
}

// ==================== create_transaction ====================

#[tokio::test]
async fn test_create_transaction_signs_and_submits() {
    let mock = MockTransport::new();
    let client = ApiClient::with_transport(mock.clone());

    let result = create_transaction(&client, chain_id(), reguser(Some("alice@active")), WIF, "active")
        .await
        .unwrap();
    assert_eq!(
        result.transaction_id.to_hex(),
        "be194c146b83b80bc4834e05afc67355c960b326acf8612ac72ddbc9f62c7584"
    );

    let packed = submitted(&mock);
    assert_eq!(packed.compression, 0);
    let trx = packed.transaction().unwrap();
    assert_eq!(trx.header.ref_block_num, 990);
    assert_eq!(trx.header.expiration.to_string(), "2024-01-01T00:02:00");
    assert_eq!(trx.actions[0].authorization[0].to_string(), "alice@active");

    let digest = trx.signing_digest(&chain_id(), &[]);
    let wallet = Wallet::from_key_str(WIF).unwrap();
    assert_eq!(packed.signatures[0].recover(&digest).unwrap(), *wallet.public_key());
    assert_eq!(result.signatures, packed.signatures);
}

#[tokio::test]
async fn test_missing_key_fails_before_network() {
    let mock = MockTransport::new();
    let client = ApiClient::with_transport(mock.clone());

    let err = create_transaction(&client, chain_id(), reguser(Some("alice@active")), "", "active")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Private key is required");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_key() {
    let client = ApiClient::new_mock();
    let err = create_transaction(&client, chain_id(), reguser(Some("alice@active")), "5Kbogus", "active")
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Invalid private key"));
}

#[tokio::test]
async fn test_node_rejection_is_normalized() {
    let mock = MockTransport::new();
    mock.set_error(
        PUSH,
        500,
        json!({
            "code": 500,
            "message": "Internal Service Error",
            "error": {
                "code": 3090003,
                "name": "unsatisfied_authorization",
                "what": "Provided keys, permissions, and delays do not satisfy declared authorizations",
                "details": [{"message": "transaction declares authority '{\"actor\":\"alice\",\"permission\":\"active\"}', but does not have signatures for it.", "file": "authorization_manager.cpp", "line_number": 643, "method": "check_authorization"}]
            }
        }),
    );
    let client = ApiClient::with_transport(mock);

    let err = create_transaction(&client, chain_id(), reguser(Some("alice@active")), WIF, "active")
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("transaction declares authority"));
    assert!(matches!(&err, SdkError::Operation { .. }));
    assert_eq!(err.rpc_body().unwrap()["error"]["code"], 3090003);
    assert_eq!(extract_error_details(&err).unwrap(), err.to_string());
}

#[tokio::test]
async fn test_unreachable_node() {
    let mock = MockTransport::new();
    mock.set_error("/v1/chain/get_info", 502, serde_json::Value::Null);
    let client = ApiClient::with_transport(mock);

    let err = create_transaction(&client, chain_id(), reguser(Some("alice@active")), WIF, "active")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown error occurred");
}

#[tokio::test]
async fn test_requires_authorizer() {
    let client = ApiClient::new_mock();
    let err = create_transaction(&client, chain_id(), reguser(None), WIF, "active").await.unwrap_err();
    assert_eq!(err.to_string(), "Missing required field: authorization");
}

// ==================== Session ====================

#[tokio::test]
async fn test_session_fills_authorization() {
    let mock = MockTransport::new();
    let client = ApiClient::with_transport(mock.clone());
    let session = Session::new(
        client,
        chain_id(),
        "token.bk@active".parse().unwrap(),
        Wallet::from_key_str(WIF).unwrap(),
    )
    .with_expire_seconds(30);
    assert_eq!(session.actor(), name("token.bk"));

    create_transaction_with_session(&session, reguser(None)).await.unwrap();

    let trx = submitted(&mock).transaction().unwrap();
    assert_eq!(trx.actions[0].authorization[0].to_string(), "token.bk@active");
    assert_eq!(trx.header.expiration.to_string(), "2024-01-01T00:00:30");
}

#[tokio::test]
async fn test_session_keeps_explicit_authorization() {
    let mock = MockTransport::new();
    let session = Session::new(
        ApiClient::with_transport(mock.clone()),
        chain_id(),
        "token.bk@active".parse().unwrap(),
        Wallet::new_random(),
    );
    session.transact(vec![reguser(Some("bob@owner"))]).await.unwrap();

    let trx = submitted(&mock).transaction().unwrap();
    assert_eq!(trx.actions[0].authorization[0].to_string(), "bob@owner");
}

#[test]
fn test_session_debug_hides_key() {
    let session = Session::new(
        ApiClient::new_mock(),
        chain_id(),
        "alice@active".parse().unwrap(),
        Wallet::from_key_str(WIF).unwrap(),
    );
    let text = format!("{session:?}");
    assert!(text.starts_with("Session"));
    assert!(text.contains("expire_seconds"));
    assert!(!text.contains(WIF));
    assert!(!text.contains("PVT_K1_"));
}
