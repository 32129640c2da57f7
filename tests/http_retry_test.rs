//! Integration tests for bearer-token injection and the single
//! refresh-and-retry protocol on 401 responses.

use cricbet::{Cricbet, CricbetConfig, CricbetError, TokenPair};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Cricbet {
    Cricbet::new(CricbetConfig::new(server.uri())).unwrap()
}

fn seed_session(client: &Cricbet, access: &str, refresh: &str) {
    client.session().login(TokenPair {
        access: access.to_string(),
        refresh: refresh.to_string(),
    });
}

fn profile_body() -> serde_json::Value {
    json!({"username": "sam", "balance": "2500.00"})
}

#[tokio::test]
async fn bearer_token_attached_to_requests() {
    let server = MockServer::start().await;
    let client = client(&server);
    seed_session(&client, "tok1", "ref1");

    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client.http().user_profile().await.unwrap();
    assert_eq!(profile.username, "sam");
}

#[tokio::test]
async fn single_401_refreshes_and_retries_once() {
    let server = MockServer::start().await;
    let client = client(&server);
    seed_session(&client, "stale", "ref1");

    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .and(body_json(json!({"refresh": "ref1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client.http().user_profile().await.unwrap();
    assert_eq!(profile.username, "sam");

    // Session holds the refreshed token; the refresh token is untouched.
    assert_eq!(client.session().access_token().as_deref(), Some("fresh"));
    assert_eq!(client.session().refresh_token().as_deref(), Some("ref1"));
}

#[tokio::test]
async fn concurrent_401s_trigger_one_refresh() {
    let server = MockServer::start().await;
    let client = client(&server);
    seed_session(&client, "stale", "ref1");

    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(2)
        .mount(&server)
        .await;

    let http = client.http();
    let (a, b) = tokio::join!(http.user_profile(), http.user_profile());
    assert!(a.is_ok());
    assert!(b.is_ok());
}

#[tokio::test]
async fn second_401_after_refresh_clears_session() {
    let server = MockServer::start().await;
    let client = client(&server);
    seed_session(&client, "stale", "ref1");

    // Unauthorized for the stale token and the refreshed one.
    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.http().user_profile().await.unwrap_err();
    assert!(matches!(err, CricbetError::SessionExpired(_)));
    assert!(!client.session().is_logged_in());
    assert_eq!(client.session().refresh_token(), None);
}

#[tokio::test]
async fn refresh_failure_clears_session() {
    let server = MockServer::start().await;
    let client = client(&server);
    seed_session(&client, "stale", "bad-refresh");

    Mock::given(method("GET"))
        .and(path("/user-profile/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Token is invalid"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client.http().user_profile().await.unwrap_err();
    assert!(matches!(err, CricbetError::SessionExpired(_)));
    assert!(!client.session().is_logged_in());
}

#[tokio::test]
async fn anonymous_401_is_not_retried() {
    let server = MockServer::start().await;
    let client = client(&server);

    Mock::given(method("POST"))
        .and(path("/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"detail": "No active account found with the given credentials"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.http().login("sam", "wrong").await.unwrap_err();
    match err {
        CricbetError::Http { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("No active account"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn error_envelope_message_is_extracted() {
    let server = MockServer::start().await;
    let client = client(&server);
    seed_session(&client, "tok1", "ref1");

    Mock::given(method("POST"))
        .and(path("/deposit/verify/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid OTP."})))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .http()
        .verify_deposit(rust_decimal_macros::dec!(500), "000000")
        .await
        .unwrap_err();
    match err {
        CricbetError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid OTP.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
