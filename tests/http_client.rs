//! HTTP transport behavior against a mock server.

use std::sync::Once;

use reqwest::Method;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use discord_webapi::{
    Discord, HttpRestClient, RequestOptions, RestClient, RetryConfig, WebApiConfig, WebApiError,
};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

fn client_for(server: &MockServer) -> HttpRestClient {
    let config = WebApiConfig {
        api_url: server.uri(),
        retry: RetryConfig {
            max_attempts: 3,
            initial_delay_ms: 10,
            max_delay_ms: 50,
        },
        ..WebApiConfig::default()
    };
    HttpRestClient::new(&config).unwrap()
}

#[tokio::test]
async fn sends_bot_auth_and_decodes_json() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/guilds/42"))
        .and(header("authorization", "Bot token-1"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42", "name": "G"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value = client
        .request(Method::GET, "/guilds/42", None, RequestOptions::bot("token-1"))
        .await
        .unwrap();

    assert_eq!(value["name"], "G");
}

#[tokio::test]
async fn surfaces_discord_error_body() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/guilds/42"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"message": "Missing Access", "code": 50001})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .request(Method::GET, "/guilds/42", None, RequestOptions::bot("t"))
        .await
        .unwrap_err();

    match err {
        WebApiError::Api { code, message, .. } => {
            assert_eq!(code, 50001);
            assert_eq!(message, "Missing Access");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn retries_after_rate_limit() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/guilds/42"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v7/guilds/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42", "name": "G"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value = client
        .request(Method::GET, "/guilds/42", None, RequestOptions::bot("t"))
        .await
        .unwrap();

    assert_eq!(value["id"], "42");
}

#[tokio::test]
async fn gives_up_once_attempts_are_exhausted() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/guilds/42"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .request(Method::GET, "/guilds/42", None, RequestOptions::bot("t"))
        .await
        .unwrap_err();

    assert!(matches!(err, WebApiError::RateLimited { .. }));
}

#[tokio::test]
async fn empty_success_body_decodes_to_null() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/guilds/42/members/7/roles/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value = client
        .request(
            Method::GET,
            "/guilds/42/members/7/roles/9",
            None,
            RequestOptions::default(),
        )
        .await
        .unwrap();

    assert!(value.is_null());
}

#[tokio::test]
async fn facade_round_trip_over_http() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/guilds/42"))
        .and(header("authorization", "Bot t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42", "name": "G"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = WebApiConfig {
        api_url: server.uri(),
        ..WebApiConfig::default()
    };
    let client = Discord::new(config).unwrap();

    let guild = client.get_guild("42", "t").await.unwrap();
    assert_eq!(guild.name, "G");

    // Second lookup must come from the cache; expect(1) above verifies the
    // server saw exactly one request.
    let cached = client.get_guild("42", "t").await.unwrap();
    assert_eq!(cached.id, "42");
}
