//! Tests for the Core API callers

use super::*;
use crate::connection::{Connection, Credentials};
use crate::error::Error;
use crate::http::HttpClientConfig;
use crate::query::{Endpoint, LookupType};
use crate::types::CoreApiVersion;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> CoreApi {
    let creds = Credentials::new("api_user", "secret").unwrap();
    let conn = Connection::connect(&server.uri(), creds).unwrap();
    CoreApi::with_config(conn, HttpClientConfig::builder().no_backoff().build()).unwrap()
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_list_page(server: &MockServer, route: &str, start_index: u64, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("startIndex", start_index.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": items })))
        .expect(1)
        .mount(server)
        .await;
}

fn version_document() -> Value {
    json!({
        "jiveVersion": "2018.22.0.0_jx",
        "jiveCoreVersions": [
            {"version": 2, "revision": 3, "uri": "/api/core/v2"},
            {"version": 3, "revision": 15, "uri": "/api/core/v3"}
        ],
        "jiveEdition": {"product": "cloud", "tier": 3}
    })
}

// ============================================================================
// Single-entity Lookup
// ============================================================================

#[tokio::test]
async fn test_get_data_by_id_with_all_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/core/v3/places/1234"))
        .and(query_param("fields", "@all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"placeID": "1234"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let place = api
        .get_data(Endpoint::Places, "1234", LookupType::Id, true, false)
        .await
        .unwrap();
    assert_eq!(place, json!({"placeID": "1234"}));
}

#[tokio::test]
async fn test_get_data_email_only_for_people() {
    let server = MockServer::start().await;
    let api = api_for(&server);
    let err = api
        .get_data(Endpoint::Places, "a@b.c", LookupType::Email, false, false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLookupType { .. }));
}

#[tokio::test]
async fn test_get_data_ignored_failure_is_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let value = api
        .get_data(Endpoint::Contents, "99", LookupType::Id, false, true)
        .await
        .unwrap();
    assert_eq!(value, json!({}));

    let err = api
        .get_data(Endpoint::Contents, "99", LookupType::Id, false, false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::GetRequest { status: 404, .. }));
}

#[tokio::test]
async fn test_get_data_embedded_error() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/core/v3/publications/7",
        json!({"error": {"status": 404, "message": "Publication not found"}}),
    )
    .await;

    let api = api_for(&server);
    let err = api
        .get_data(Endpoint::Publications, "7", LookupType::Id, false, false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { ref subject, .. } if subject == "publications"));

    let value = api
        .get_data(Endpoint::Publications, "7", LookupType::Id, false, true)
        .await
        .unwrap();
    assert_eq!(value, json!({}));

    let err = api.get_publication("7", None, false).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(api.get_publication("7", None, true).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_single_entity_embedded_error() {
    let server = MockServer::start().await;
    let embedded = json!({"error": {"status": 500, "message": "Internal error"}});
    mount_json(&server, "/api/core/v3/securityGroups/3", embedded.clone()).await;
    mount_json(&server, "/api/core/v3/places/1234", embedded).await;

    let api = api_for(&server);
    let err = api.get_group_info("3", None, false).await.unwrap_err();
    assert!(matches!(err, Error::Request { status: 500, .. }));
    assert!(api.get_group_info("3", None, true).await.unwrap().is_empty());

    let err = api.get_place_info("1234", None, false).await.unwrap_err();
    assert!(matches!(err, Error::Request { status: 500, .. }));
    assert!(api.get_place_info("1234", None, true).await.unwrap().is_empty());
}

#[test]
fn test_resolve_lookup_type() {
    assert_eq!(resolve_lookup_type("username", false).unwrap(), LookupType::Username);
    assert_eq!(resolve_lookup_type("guid", true).unwrap(), LookupType::Id);
    assert!(matches!(
        resolve_lookup_type("guid", false),
        Err(Error::InvalidLookupType { .. })
    ));
}

// ============================================================================
// Platform Information
// ============================================================================

#[tokio::test]
async fn test_api_info_filters() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/version", version_document()).await;
    let api = api_for(&server);

    assert_eq!(
        api.get_api_info(ApiInfoFilter::None).await.unwrap(),
        version_document()
    );
    assert_eq!(
        api.get_api_info(ApiInfoFilter::Environment).await.unwrap(),
        json!("cloud")
    );
    assert_eq!(api.get_api_info(ApiInfoFilter::Tier).await.unwrap(), json!(3));
    assert_eq!(api.get_api_info(ApiInfoFilter::Sso).await.unwrap(), json!({}));
    assert_eq!(api.get_api_version(CoreApiVersion::V3).await.unwrap(), "3.15");
    assert_eq!(api.get_api_version(CoreApiVersion::V2).await.unwrap(), "2.3");
    assert_eq!(api.get_platform_version().await.unwrap(), "2018.22.0.0_jx");
}

#[test]
fn test_api_info_filter_parse() {
    assert_eq!("V3".parse::<ApiInfoFilter>().unwrap(), ApiInfoFilter::V3);
    assert_eq!(ApiInfoFilter::Environment.to_string(), "environment");
    assert!("build".parse::<ApiInfoFilter>().is_err());
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_get_user_id_requires_email() {
    let server = MockServer::start().await;
    let api = api_for(&server);
    let err = api.get_user_id("jdoe").await.unwrap_err();
    assert!(matches!(err, Error::LookupMismatch { .. }));
}

#[tokio::test]
async fn test_user_lookups() {
    let server = MockServer::start().await;
    let person = json!({
        "id": 1001,
        "emails": [{"value": "jane@example.com"}],
        "jive": {"username": "jdoe"}
    });
    mount_json(&server, "/api/core/v3/people/email/jane@example.com", person.clone()).await;
    mount_json(&server, "/api/core/v3/people/1001", person.clone()).await;
    mount_json(&server, "/api/core/v3/people/username/jdoe", person).await;
    let api = api_for(&server);

    assert_eq!(api.get_user_id("jane@example.com").await.unwrap(), "1001");
    assert_eq!(
        api.get_primary_email("1001", LookupType::Id).await.unwrap(),
        "jane@example.com"
    );
    assert_eq!(
        api.get_primary_email("jdoe", LookupType::Username).await.unwrap(),
        "jane@example.com"
    );
    assert_eq!(api.get_username("1001", LookupType::Id).await.unwrap(), "jdoe");
}

#[tokio::test]
async fn test_get_people_followed() {
    let server = MockServer::start().await;
    let route = "/api/core/v3/people/1001/@following";
    mount_list_page(&server, route, 0, vec![json!({"id": "7"}), json!({"id": 8})]).await;
    mount_list_page(&server, route, 100, Vec::new()).await;

    let api = api_for(&server);
    let followed = api.get_people_followed("1001", false).await.unwrap();
    assert_eq!(followed, vec!["7".to_string(), "8".to_string()]);
}

#[tokio::test]
async fn test_get_user_content_count() {
    let server = MockServer::start().await;
    let route = "/api/core/v3/contents";
    let items = |n: usize| (0..n).map(|i| json!({"id": i.to_string()})).collect::<Vec<_>>();
    mount_list_page(&server, route, 0, items(100)).await;
    mount_list_page(&server, route, 100, items(30)).await;
    mount_list_page(&server, route, 200, Vec::new()).await;

    let api = api_for(&server);
    assert_eq!(api.get_user_content_count("1001").await.unwrap(), 130);
}

#[tokio::test]
async fn test_get_recent_logins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/core/v3/people"))
        .and(query_param("sort", "lastLoggedIn"))
        .and(query_param("count", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": [{"id": "1"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let logins = api.get_recent_logins(25, 0).await.unwrap();
    assert_eq!(logins, vec![json!({"id": "1"})]);
}

#[test]
fn test_parse_user_fields() {
    let user = json!({
        "id": "1001",
        "name": {"formatted": "Jane Doe"},
        "emails": [{"value": "jane@example.com"}],
        "initialLogin": "2019-03-01T10:05:00.000+0000",
        "jive": {
            "username": "jdoe",
            "enabled": true,
            "lastAuthenticated": "not-a-timestamp",
            "profile": [
                {"jive_label": "Company", "value": "Example Corp"},
                {"jive_label": "Title", "value": "Engineer"},
                {"jive_label": "Favorite Color", "value": "Blue"}
            ]
        },
        "tags": ["rust", "api"],
        "addresses": [{"value": {"streetAddress": "1 Main St\nSuite 2", "locality": "Springfield"}}]
    });

    let parsed = parse_user_fields(&user);
    assert_eq!(
        Value::Object(parsed),
        json!({
            "user_jive_id": "1001",
            "user_full_name": "Jane Doe",
            "user_email": "jane@example.com",
            "user_username": "jdoe",
            "user_enabled": true,
            "user_first_login": "2019-03-01T10:05:00",
            "user_last_login": DEFAULT_TIMESTAMP,
            "user_tags": "rust, api",
            "user_address_street": "1 Main StSuite 2",
            "user_address_city": "Springfield",
            "user_company": "Example Corp",
            "user_job_title": "Engineer"
        })
    );
}

#[test]
fn test_validate_timestamp() {
    assert_eq!(validate_timestamp("2020-02-29T23:59:59"), "2020-02-29T23:59:59");
    assert_eq!(validate_timestamp("2020-13-01T00:00:00"), DEFAULT_TIMESTAMP);
}

// ============================================================================
// Groups, Places, Publications
// ============================================================================

#[tokio::test]
async fn test_get_group_info() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/core/v3/securityGroups/3",
        json!({"id": "3", "name": "Admins", "memberCount": 4, "extra": true}),
    )
    .await;

    let api = api_for(&server);
    let group = api.get_group_info("3", None, false).await.unwrap();
    assert_eq!(
        Value::Object(group),
        json!({"id": "3", "name": "Admins", "memberCount": 4})
    );
}

#[tokio::test]
async fn test_get_group_info_reports_missing_fields() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/core/v3/securityGroups/3",
        json!({"id": "3", "name": "Admins"}),
    )
    .await;

    let api = api_for(&server);
    let fields = vec!["id".to_string(), "name".to_string(), "memberCount".to_string()];
    let (subscriber, warnings) = crate::dataset::tests::warn_counting_subscriber();
    let _guard = tracing::subscriber::set_default(subscriber);

    let group = api
        .get_group_info("3", Some(fields.as_slice()), false)
        .await
        .unwrap();
    assert_eq!(Value::Object(group), json!({"id": "3", "name": "Admins"}));
    assert_eq!(warnings.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_group_memberships() {
    let server = MockServer::start().await;
    let route = "/api/core/v3/securityGroups/3/administrators";
    mount_list_page(
        &server,
        route,
        0,
        vec![json!({"id": "1", "jive": {"username": "admin1"}})],
    )
    .await;
    mount_list_page(&server, route, 100, Vec::new()).await;

    let api = api_for(&server);
    let fields = vec!["id".to_string(), "jive.username".to_string()];
    let admins = api
        .get_group_memberships("3", GroupRole::Admin, Some(fields.as_slice()), false)
        .await
        .unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0]["jive.username"], "admin1");
}

#[tokio::test]
async fn test_get_place_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/core/v3/places"))
        .and(query_param("filter", "entityDescriptor(14,5678)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"placeID": "1234", "id": "5678"}]
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    assert_eq!(api.get_place_id("5678").await.unwrap(), "1234");
}

#[tokio::test]
async fn test_space_permissions_embedded_error() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/core/v3/places/1234/appliedEntitlements",
        json!({"error": {"status": 404, "message": "Place not found"}}),
    )
    .await;

    let api = api_for(&server);
    let err = api.get_space_permissions("1234").await.unwrap_err();
    match err {
        Error::NotFound { subject, .. } => assert_eq!(subject, "space"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_space_permissions_are_unprojected() {
    let server = MockServer::start().await;
    let route = "/api/core/v3/places/1234/appliedEntitlements";
    let entitlement = json!({"object": {"id": "3"}, "entitlements": ["VIEW", "CREATE"]});
    mount_list_page(&server, route, 0, vec![entitlement.clone()]).await;
    mount_list_page(&server, route, 100, Vec::new()).await;

    let api = api_for(&server);
    assert_eq!(api.get_space_permissions("1234").await.unwrap(), vec![entitlement]);
}

#[tokio::test]
async fn test_delete_publication() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/core/v3/publications/12"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/core/v3/publications/13"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    api.delete_publication("12").await.unwrap();
    let err = api.delete_publication("13").await.unwrap_err();
    assert!(matches!(err, Error::DeleteRequest { status: 403, .. }));
}

#[tokio::test]
async fn test_get_publication() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/core/v3/publications/12",
        json!({"id": "12", "name": "Weekly", "subscriberCount": 40}),
    )
    .await;

    let api = api_for(&server);
    let publication = api.get_publication("12", None, false).await.unwrap();
    assert_eq!(
        Value::Object(publication),
        json!({"id": "12", "name": "Weekly", "subscriberCount": 40})
    );
}

// ============================================================================
// Content
// ============================================================================

#[tokio::test]
async fn test_get_content_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/core/v3/contents"))
        .and(query_param("filter", "entityDescriptor(102,1234)"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"contentID": "55501", "id": "888"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/core/v3/contents"))
        .and(query_param("filter", "entityDescriptor(102,9999)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let url = format!("{}/docs/DOC-1234", server.uri());
    assert_eq!(
        api.get_content_id(&url, ContentType::Document).await.unwrap(),
        "55501"
    );

    let missing = format!("{}/docs/DOC-9999", server.uri());
    let err = api
        .get_content_id(&missing, ContentType::Document)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ContentNotFound { .. }));
}

#[tokio::test]
async fn test_paginated_content_identifies_dataset() {
    let server = MockServer::start().await;
    let route = "/api/core/v3/securityGroups/3/members";
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("startIndex", "0"))
        .and(query_param("sort", "lastNameAsc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"id": "1", "displayName": "Jane", "jive": {"username": "jdoe"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_list_page(&server, route, 100, Vec::new()).await;

    let api = api_for(&server);
    let members = api
        .get_paginated_content("securityGroups/3/members", "sort=lastNameAsc", None, false, None, true)
        .await
        .unwrap();
    assert_eq!(
        Value::Object(members[0].clone()),
        json!({"id": "1", "displayName": "Jane", "jive.username": "jdoe"})
    );
}

#[tokio::test]
async fn test_paginated_content_unknown_uri() {
    let server = MockServer::start().await;
    let api = api_for(&server);
    let err = api
        .get_paginated_content("tiles", "", None, false, None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DatasetNotFound { .. }));
}
