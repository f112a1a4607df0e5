//! Admin passthrough tests: the token gate, session expiry, and typed calls.
//!
//! The admin policy is stricter than the customer one: no request leaves
//! without a token, and both 401 and 403 end the session with a notice.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use shopease_admin::{AdminClient, AlertStack};
use shopease_core::api::Method;
use shopease_core::{
    ClientConfig, MemoryNavigator, MemorySessionStore, NotificationKind, Role, SessionStore,
    StoredUser,
};
use shopease_integration_tests::TestContext;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Token Gate
// ============================================================================

#[tokio::test]
async fn test_missing_token_redirects_without_issuing_a_request() {
    let server = MockServer::start().await;

    let ctx = TestContext::logged_out(&server.uri());
    let result = ctx
        .admin()
        .call(Method::GET, "/api/admin/orders", None)
        .await
        .expect("Missing token is not an error");

    assert_eq!(result, None);
    assert_eq!(ctx.navigator.visited(), vec!["/login".to_owned()]);
    assert!(ctx.notifier.sent().is_empty());

    let requests = server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert!(requests.is_empty(), "no request may leave without a token");
}

// ============================================================================
// Session Expiry
// ============================================================================

#[tokio::test]
async fn test_401_clears_session_and_warns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in_admin(&server.uri(), "stale-token");
    let result = ctx
        .admin()
        .call(Method::GET, "/api/admin/orders", None)
        .await
        .expect("Expired session is not an error");

    assert_eq!(result, None);
    assert_eq!(ctx.session.token(), None);
    assert_eq!(ctx.navigator.visited(), vec!["/login".to_owned()]);

    let notifications = ctx.notifier.sent();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Warning);
    assert_eq!(notifications[0].message, "Session expired or access denied");
}

#[tokio::test]
async fn test_logout_ends_the_session_locally() {
    let ctx = TestContext::logged_in_admin("http://127.0.0.1:1", "admin-tok");

    ctx.admin().logout();

    assert_eq!(ctx.session.token(), None);
    assert_eq!(ctx.navigator.visited(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn test_403_short_circuits_like_401() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/products/3"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in_admin(&server.uri(), "viewer-token");
    let result: Option<serde_json::Value> = ctx
        .admin()
        .delete("/api/admin/products/3")
        .await
        .expect("Access denial is not an error");

    assert_eq!(result, None);
    assert_eq!(ctx.session.token(), None);
    assert_eq!(
        ctx.notifier.messages(),
        vec!["Session expired or access denied".to_owned()]
    );
}

#[tokio::test]
async fn test_session_expiry_reaches_the_alert_stack() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    // The production wiring: the alert stack itself is the notifier.
    let alerts = AlertStack::new();
    let config = ClientConfig {
        api_base: Url::parse(&server.uri()).expect("mock server URI is a valid URL"),
        login_path: "/login".to_owned(),
        home_path: "/".to_owned(),
    };
    let session = MemorySessionStore::with_session("stale-token", &StoredUser::with_role(Role::Admin));
    let client = AdminClient::new(
        &config,
        Arc::new(session),
        Arc::new(MemoryNavigator::default()),
        Arc::new(alerts.clone()),
    );

    let result = client
        .call(Method::GET, "/api/admin/orders", None)
        .await
        .expect("Expired session is not an error");

    assert_eq!(result, None);
    let active = alerts.active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind, NotificationKind::Warning);
    assert_eq!(active[0].message, "Session expired or access denied");
}

// ============================================================================
// Passthrough Calls
// ============================================================================

#[tokio::test]
async fn test_put_sends_bearer_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/orders/7/status"))
        .and(header("Authorization", "Bearer admin-tok"))
        .and(body_json(&json!({ "status": "SHIPPED" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "status": "SHIPPED" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in_admin(&server.uri(), "admin-tok");
    let result = ctx
        .admin()
        .call(
            Method::PUT,
            "/api/admin/orders/7/status",
            Some(&json!({ "status": "SHIPPED" })),
        )
        .await
        .expect("Request should succeed");

    let body = result.expect("Success body expected");
    assert_eq!(body["status"], "SHIPPED");
}

#[tokio::test]
async fn test_endpoint_query_string_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders"))
        .and(query_param("status", "PENDING"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in_admin(&server.uri(), "admin-tok");
    let result = ctx
        .admin()
        .call(Method::GET, "/api/admin/orders?status=PENDING", None)
        .await
        .expect("Request should succeed");

    assert_eq!(result, Some(json!([])));
}

#[tokio::test]
async fn test_typed_post_parses_the_created_resource() {
    #[derive(Debug, Deserialize)]
    struct CreatedProduct {
        id: i64,
    }

    let payload = json!({ "name": "Desk Lamp", "price": 34.99, "stockQuantity": 12 });

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/products"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 31 })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in_admin(&server.uri(), "admin-tok");
    let created: Option<CreatedProduct> = ctx
        .admin()
        .post("/api/admin/products", Some(&payload))
        .await
        .expect("Request should succeed");

    assert_eq!(created.expect("Success body expected").id, 31);
}

#[tokio::test]
async fn test_typed_get_deserializes_the_body() {
    #[derive(Debug, Deserialize)]
    struct OrderSummary {
        id: i64,
        status: String,
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 7, "status": "PENDING", "total": 99.5 })),
        )
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in_admin(&server.uri(), "admin-tok");
    let order: Option<OrderSummary> = ctx
        .admin()
        .get("/api/admin/orders/7")
        .await
        .expect("Request should succeed");

    let order = order.expect("Success body expected");
    assert_eq!(order.id, 7);
    assert_eq!(order.status, "PENDING");
}
