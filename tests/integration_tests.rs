//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: helper file → connection → Core API
//! requests → projected records

use khoros_jx::http::HttpClientConfig;
use khoros_jx::types::BackoffType;
use khoros_jx::{
    Connection, CoreApi, Credentials, Endpoint, Error, GroupRole, HelperConfig, LookupType,
    PaginatedQuery,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> HttpClientConfig {
    HttpClientConfig::builder()
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(5),
        )
        .build()
}

fn api_for(server: &MockServer) -> CoreApi {
    let credentials = Credentials::new("api_user", "secret").unwrap();
    let connection = Connection::connect(&server.uri(), credentials).unwrap();
    CoreApi::with_config(connection, test_config()).unwrap()
}

fn person(id: u64) -> serde_json::Value {
    json!({
        "id": id.to_string(),
        "displayName": format!("User {id}"),
        "emails": [{"value": format!("user{id}@example.com"), "primary": true}],
        "jive": {"username": format!("user{id}"), "enabled": true}
    })
}

// ============================================================================
// Helper File → Connection
// ============================================================================

#[tokio::test]
async fn test_helper_file_to_platform_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/version"))
        .and(basic_auth("api_user", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jiveVersion": "2018.22.0.0_jx",
            "jiveCoreVersions": [
                {"version": 2, "revision": 3},
                {"version": 3, "revision": 15}
            ]
        })))
        .mount(&mock_server)
        .await;

    let yaml = format!(
        "connection:\n  base_url: {}\n  credentials:\n    username: api_user\n    password: secret\nstyling:\n  use_console_colors: no\n",
        mock_server.uri()
    );
    let helper = HelperConfig::from_yaml_str(&yaml).unwrap();
    assert!(!helper.use_console_colors());

    let api = CoreApi::with_config(Connection::from_helper(&helper).unwrap(), test_config())
        .unwrap();
    assert_eq!(api.get_platform_version().await.unwrap(), "2018.22.0.0_jx");
    assert_eq!(
        api.get_api_version(khoros_jx::CoreApiVersion::V3)
            .await
            .unwrap(),
        "3.15"
    );
}

#[tokio::test]
async fn test_bad_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let err = api
        .get_data(Endpoint::People, "1001", LookupType::Id, false, false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BadCredentials { .. }));
}

// ============================================================================
// Paginated Collection
// ============================================================================

#[tokio::test]
async fn test_paginated_people_with_filter() {
    let mock_server = MockServer::start().await;

    let first: Vec<_> = (0..100).map(person).collect();
    let second: Vec<_> = (100..120).map(person).collect();

    for (start, list) in [("0", first), ("100", second), ("200", vec![])] {
        Mock::given(method("GET"))
            .and(path("/api/core/v3/people"))
            .and(query_param("startIndex", start))
            .and(query_param("count", "100"))
            .and(query_param("fields", "@all"))
            .and(query_param("filter", "include-disabled(true)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": list })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let api = api_for(&mock_server);
    let query = PaginatedQuery::new(api.query_url(["people"]), "people")
        .filter("include-disabled", "true")
        .return_fields(["id", "email.value", "jive.username"]);
    let records = api.get_paginated(query).await.unwrap();

    assert_eq!(records.len(), 120);
    assert_eq!(records[0]["id"], "0");
    assert_eq!(records[119]["email.value"], "user119@example.com");
    assert_eq!(records[42]["jive.username"], "user42");
    assert!(records[0].get("displayName").is_none());
}

#[tokio::test]
async fn test_group_members_default_projection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/core/v3/securityGroups/1234/members"))
        .and(query_param("startIndex", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [person(7), person(8)]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/core/v3/securityGroups/1234/members"))
        .and(query_param("startIndex", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let members = api
        .get_group_memberships("1234", GroupRole::Member, None, false)
        .await
        .unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members[1]["id"], "8");
    assert_eq!(members[1]["displayName"], "User 8");
    assert_eq!(members[1]["email.value"], "user8@example.com");
}

#[tokio::test]
async fn test_pagination_error_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/core/v3/securityGroups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"status": 404, "message": "Not found"}
        })))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let err = api.get_all_groups(None, false).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));

    let ignored = api.get_all_groups(None, true).await.unwrap();
    assert!(ignored.is_empty());
}

// ============================================================================
// Lookups and Deletes
// ============================================================================

#[tokio::test]
async fn test_user_id_by_email() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/core/v3/people/email/user5@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(person(5)))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    assert_eq!(api.get_user_id("user5@example.com").await.unwrap(), "5");
    assert!(matches!(
        api.get_user_id("not-an-email").await,
        Err(Error::LookupMismatch { .. })
    ));
}

#[tokio::test]
async fn test_connection_failure_after_retries() {
    let credentials = Credentials::new("api_user", "secret").unwrap();
    let connection = Connection::connect("http://127.0.0.1:9", credentials).unwrap();
    let api = CoreApi::with_config(connection, test_config()).unwrap();

    let err = api.get_platform_version().await.unwrap_err();
    assert!(matches!(err, Error::ConnectionFailure { attempts: 3, .. }));
}

#[tokio::test]
async fn test_delete_publication() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/core/v3/publications/55"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    api.delete_publication("55").await.unwrap();
}
