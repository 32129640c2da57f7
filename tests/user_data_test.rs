//! Integration tests for the user-data fan-out: profile, exposure, and
//! transaction history are fetched together and committed atomically.

use std::sync::Arc;

use cricbet::{Cricbet, CricbetConfig, CricbetUser, TokenPair, TransactionType};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> CricbetConfig {
    CricbetConfig::new(server.uri())
}

fn seed_session(client: &Cricbet) {
    client.session().login(TokenPair {
        access: "tok1".to_string(),
        refresh: "ref1".to_string(),
    });
}

async fn mount_user_data(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"username": "sam", "balance": "2500.00"}),
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user-exposure/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"exposure": "150.00"})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transaction-history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "transaction_type": "deposit",
                "amount": "2500.00",
                "timestamp": "2025-01-15T10:30:00Z"
            }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_commits_all_three_feeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a1", "refresh": "r1"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_user_data(&server).await;

    let client = Arc::new(Cricbet::new(config(&server)).unwrap());
    let mut user = CricbetUser::new(client.clone());

    user.login("sam", "hunter2").await.unwrap();

    assert!(user.is_logged_in());
    assert_eq!(client.session().access_token().as_deref(), Some("a1"));
    assert_eq!(user.user.username, "sam");
    assert_eq!(user.user.balance, Some(dec!(2500.00)));
    assert_eq!(user.exposure, dec!(150.00));
    assert_eq!(user.transactions.len(), 1);
    assert_eq!(user.transactions[0].transaction_type, TransactionType::Deposit);
}

#[tokio::test]
async fn partial_failure_commits_nothing_and_logs_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"username": "sam", "balance": "2500.00"}),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user-exposure/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transaction-history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = Arc::new(Cricbet::new(config(&server)).unwrap());
    seed_session(&client);
    let mut user = CricbetUser::new(client.clone());

    assert!(user.fetch_user_data().await.is_err());

    // Nothing committed, session gone.
    assert_eq!(user.user.username, "");
    assert_eq!(user.user.balance, None);
    assert_eq!(user.exposure, dec!(0));
    assert!(user.transactions.is_empty());
    assert!(!client.session().is_logged_in());
}

#[tokio::test]
async fn partial_failure_keeps_session_when_policy_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user-exposure/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"exposure": 0})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transaction-history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut cfg = config(&server);
    cfg.logout_on_fetch_failure = false;

    let client = Arc::new(Cricbet::new(cfg).unwrap());
    seed_session(&client);
    let mut user = CricbetUser::new(client.clone());

    assert!(user.fetch_user_data().await.is_err());
    assert!(client.session().is_logged_in());
    assert_eq!(client.session().access_token().as_deref(), Some("tok1"));
}

#[tokio::test]
async fn fetch_is_noop_without_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"username": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = Arc::new(Cricbet::new(config(&server)).unwrap());
    let mut user = CricbetUser::new(client);

    assert!(user.fetch_user_data().await.is_ok());
    assert_eq!(user.user.username, "");
}

#[tokio::test]
async fn logout_clears_session_and_aggregates() {
    let server = MockServer::start().await;
    mount_user_data(&server).await;

    let client = Arc::new(Cricbet::new(config(&server)).unwrap());
    seed_session(&client);
    let mut user = CricbetUser::new(client.clone());
    user.fetch_user_data().await.unwrap();
    assert_eq!(user.user.username, "sam");

    user.logout();
    assert!(!client.session().is_logged_in());
    assert_eq!(user.user.username, "");
    assert!(user.transactions.is_empty());
}
