//! Integration tests for artistats-catalog crate against mocked endpoints.

use artistats_catalog::{BearerToken, CatalogClient, CatalogConfig, SearchQuery};
use artistats_common::test_utils::{catalog_fixtures, init_test_logging};
use artistats_common::ArtistatsError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    let config = CatalogConfig::new("test-client-id", "test-client-secret")
        .with_token_url(format!("{}/api/token", server.uri()))
        .with_api_base_url(server.uri())
        .with_timeout(5);
    CatalogClient::new(config).unwrap()
}

#[tokio::test]
async fn test_exchange_token_sends_client_credentials_form() {
    init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=test-client-id"))
        .and(body_string_contains("client_secret=test-client-secret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(catalog_fixtures::token_response("tok-123")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server).exchange_token().await.unwrap();
    assert_eq!(token.secret(), "tok-123");
}

#[tokio::test]
async fn test_exchange_token_without_access_token_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).exchange_token().await.unwrap_err();
    assert!(matches!(err, ArtistatsError::Auth { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_exchange_token_rejected_credentials_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_client",
            "error_description": "Invalid client secret"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).exchange_token().await.unwrap_err();
    assert!(matches!(err, ArtistatsError::Auth { .. }));
    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn test_exchange_token_non_json_body_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).exchange_token().await.unwrap_err();
    assert!(matches!(err, ArtistatsError::Auth { .. }));
}

#[tokio::test]
async fn test_search_sends_bearer_and_query() {
    init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(header("authorization", "Bearer tok-123"))
        .and(query_param("query", "drake"))
        .and(query_param("type", "artist"))
        .and(query_param("limit", "10"))
        .and(query_param("market", "CA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_fixtures::three_artists()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .search(&BearerToken::new("tok-123"), &SearchQuery::default())
        .await
        .unwrap();

    assert_eq!(result.as_json(), &catalog_fixtures::three_artists());
}

#[tokio::test]
async fn test_search_error_status_is_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"status": 401, "message": "The access token expired"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(&BearerToken::new("expired"), &SearchQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ArtistatsError::Fetch { .. }));
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_search_transport_failure_is_fetch_error() {
    let config = CatalogConfig::new("id", "secret")
        .with_api_base_url("http://127.0.0.1:9")
        .with_timeout(2);
    let client = CatalogClient::new(config).unwrap();

    let err = client
        .search(&BearerToken::new("tok"), &SearchQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ArtistatsError::Fetch { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_search_custom_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("query", "the weeknd"))
        .and(query_param("limit", "3"))
        .and(query_param("market", "US"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(catalog_fixtures::search_response(&[("The Weeknd", 94)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let query = SearchQuery {
        term: "the weeknd".to_string(),
        kind: "artist".to_string(),
        limit: 3,
        market: "US".to_string(),
    };
    let result = client_for(&server)
        .search(&BearerToken::new("tok"), &query)
        .await
        .unwrap();

    assert_eq!(result.as_json()["artists"]["items"][0]["name"], "The Weeknd");
}

#[tokio::test]
async fn test_slow_search_times_out_as_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(catalog_fixtures::three_artists())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = CatalogConfig::new("test-client-id", "test-client-secret")
        .with_api_base_url(server.uri())
        .with_timeout(1);
    let client = CatalogClient::new(config).unwrap();

    let err = client
        .search(&BearerToken::new("tok-123"), &SearchQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ArtistatsError::Fetch { .. }));
    assert!(err.to_string().contains("Request timeout"), "got: {err}");
}
