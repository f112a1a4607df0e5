//! Customer request engine tests: headers, auth policy, error mapping.
//!
//! Each test stands up a fresh `wiremock` server and drives a
//! `CustomerClient` against it, then asserts on the requests the server
//! saw and the side effects left in the in-memory fakes.

use serde_json::json;
use shopease_core::SessionStore;
use shopease_core::api::{ApiError, Method, StatusCode};
use shopease_core::session::keys;
use shopease_integration_tests::TestContext;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Request Shape
// ============================================================================

#[tokio::test]
async fn test_logged_out_request_has_no_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let ctx = TestContext::logged_out(&server.uri());
    let result = ctx
        .customer()
        .api()
        .call(Method::GET, "/api/products", None)
        .await
        .expect("Request should succeed");

    assert_eq!(result, Some(json!({ "items": [] })));

    let requests = server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_stored_token_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in(&server.uri(), "tok-123");
    let result = ctx
        .customer()
        .api()
        .call(Method::GET, "/api/orders", None)
        .await
        .expect("Request should succeed");

    assert_eq!(result, Some(json!([])));
}

#[tokio::test]
async fn test_content_type_set_even_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::logged_out(&server.uri());
    ctx.customer()
        .api()
        .call(Method::GET, "/api/products", None)
        .await
        .expect("Request should succeed");
}

#[tokio::test]
async fn test_post_attaches_json_body() {
    let payload = json!({ "productId": 5, "rating": 4, "comment": "Solid" });

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reviews"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9 })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in(&server.uri(), "tok-123");
    let result = ctx
        .customer()
        .api()
        .call(Method::POST, "/api/reviews", Some(&payload))
        .await
        .expect("Request should succeed");

    assert_eq!(result, Some(json!({ "id": 9 })));
}

#[tokio::test]
async fn test_get_never_attaches_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let ctx = TestContext::logged_out(&server.uri());
    ctx.customer()
        .api()
        .call(Method::GET, "/api/products", Some(&json!({ "ignored": true })))
        .await
        .expect("Request should succeed");

    let requests = server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

// ============================================================================
// Auth Policy
// ============================================================================

#[tokio::test]
async fn test_401_clears_session_and_redirects_silently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in(&server.uri(), "stale-token");
    ctx.session.set(keys::DISCOUNT_CODE, "SAVE10");

    let result = ctx
        .customer()
        .api()
        .call(Method::GET, "/api/orders", None)
        .await
        .expect("Expired session is not an error");

    assert_eq!(result, None);
    assert_eq!(ctx.session.token(), None);
    assert_eq!(ctx.session.get(keys::USER), None);
    assert_eq!(ctx.session.get(keys::DISCOUNT_CODE), None);
    assert_eq!(ctx.navigator.visited(), vec!["/login".to_owned()]);
    assert!(ctx.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_403_is_a_plain_api_error_for_customers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Forbidden" })))
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in(&server.uri(), "tok-123");
    let err = ctx
        .customer()
        .api()
        .call(Method::GET, "/api/orders/7", None)
        .await
        .expect_err("403 should surface as an error on customer pages");

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(message, "Forbidden");
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }

    // The session survives: only the policy's unauthorized statuses clear it.
    assert_eq!(ctx.session.token(), Some("tok-123".to_owned()));
    assert!(ctx.navigator.visited().is_empty());
}

#[tokio::test]
async fn test_logout_ends_the_session_locally() {
    // Logout never talks to the server, so an unreachable one is fine.
    let ctx = TestContext::logged_in("http://127.0.0.1:1", "tok-123");
    let client = ctx.customer();
    assert!(client.is_logged_in());

    client.logout();

    assert!(!client.is_logged_in());
    assert_eq!(ctx.session.token(), None);
    assert_eq!(ctx.navigator.visited(), vec!["/login".to_owned()]);
}

// ============================================================================
// Error Bodies
// ============================================================================

#[tokio::test]
async fn test_error_message_extracted_from_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Cart is empty" })),
        )
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in(&server.uri(), "tok-123");
    let err = ctx
        .customer()
        .api()
        .call(Method::POST, "/api/orders", None)
        .await
        .expect_err("400 should surface as an error");

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Cart is empty");
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_error_body_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let ctx = TestContext::logged_in(&server.uri(), "tok-123");
    let err = ctx
        .customer()
        .api()
        .call(Method::GET, "/api/orders", None)
        .await
        .expect_err("500 should surface as an error");

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "Request failed");
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unjoinable_endpoint_is_an_error() {
    let ctx = TestContext::logged_out("http://127.0.0.1:1");
    let err = ctx
        .customer()
        .api()
        .call(Method::GET, "http://[half-an-ipv6/api", None)
        .await
        .expect_err("Unjoinable endpoint should surface as an error");

    assert!(matches!(err, ApiError::InvalidUrl { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_malformed_success_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let ctx = TestContext::logged_out(&server.uri());
    let err = ctx
        .customer()
        .api()
        .call(Method::GET, "/api/products", None)
        .await
        .expect_err("Unparseable success body should surface as an error");

    assert!(matches!(err, ApiError::Parse(_)), "got {err:?}");
}
