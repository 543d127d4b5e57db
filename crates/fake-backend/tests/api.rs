//! HTTP-level tests for the fake `/api` endpoints.
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`.

mod common;

use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get, put_json};
use grocer_fake_backend::config::FaultPlan;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /api/list returns the full catalogue in a success envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_success_envelope() {
    let (app, state) = build_test_app(FaultPlan::none());
    let response = get(app, "/api/list").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"].as_array().unwrap().len(), 25);
    assert_eq!(json["data"][0], json!({ "id": 1, "name": "Apple" }));
    assert_eq!(state.counters.list_requests(), 1);
}

// ---------------------------------------------------------------------------
// Test: kind=fruits narrows the list, unknown kinds list everything
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_honours_kind_parameter() {
    let (app, _) = build_test_app(FaultPlan::none());

    let fruits = body_json(get(app.clone(), "/api/list?kind=fruits").await).await;
    assert_eq!(fruits["data"].as_array().unwrap().len(), 10);

    let vegetables = body_json(get(app.clone(), "/api/list?kind=vegetables").await).await;
    assert_eq!(vegetables["data"].as_array().unwrap().len(), 25);

    let unknown = body_json(get(app, "/api/list?kind=meat").await).await;
    assert_eq!(unknown["data"].as_array().unwrap().len(), 25);
}

// ---------------------------------------------------------------------------
// Test: injected maintenance fault fires once with a 500 error envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_fault_fires_once() {
    let (app, _) = build_test_app(FaultPlan {
        fail_first_list: true,
        drop_first_cart_read: false,
    });

    let first = get(app.clone(), "/api/list").await;
    assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(first).await;
    assert_eq!(json["status"], "error");
    assert_eq!(
        json["data"]["error"],
        "Server is under maintenance, please retry"
    );
    assert_eq!(json["data"]["code"], "MAINTENANCE");

    let second = get(app, "/api/list").await;
    assert_eq!(second.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: empty cart, then PUT returns the full updated cart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn put_cart_returns_updated_snapshot() {
    let (app, state) = build_test_app(FaultPlan::none());

    let empty = body_json(get(app.clone(), "/api/cart").await).await;
    assert_eq!(empty, json!({ "status": "success", "data": [] }));

    put_json(app.clone(), "/api/cart", "1").await;
    let response = put_json(app.clone(), "/api/cart", "2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        json!([{ "id": 1, "name": "Apple" }, { "id": 2, "name": "Banana" }])
    );
    assert_eq!(state.cart_snapshot().await.len(), 2);
    assert_eq!(state.counters.cart_writes(), 2);
    assert_eq!(state.counters.cart_reads(), 1);
}

// ---------------------------------------------------------------------------
// Test: unknown id → 404 Item not found, cart untouched
// ---------------------------------------------------------------------------

#[tokio::test]
async fn put_unknown_id_returns_404() {
    let (app, state) = build_test_app(FaultPlan::none());
    let response = put_json(app, "/api/cart", "999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["data"]["error"], "Item not found");
    assert!(state.cart_snapshot().await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: non-numeric bodies → 400 Invalid item ID
// ---------------------------------------------------------------------------

#[tokio::test]
async fn put_non_numeric_body_returns_400() {
    let (app, state) = build_test_app(FaultPlan::none());

    for body in ["\"abc\"", "{\"id\":1}", "not json", "null"] {
        let response = put_json(app.clone(), "/api/cart", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = body_json(response).await;
        assert_eq!(json["data"]["error"], "Invalid item ID");
    }
    assert!(state.cart_snapshot().await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: fractional ids are numbers but match nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn put_fractional_id_is_not_found() {
    let (app, _) = build_test_app(FaultPlan::none());
    let response = put_json(app, "/api/cart", "1.5").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: injected cart fault breaks the body once
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cart_read_fault_breaks_body_once() {
    let (app, _) = build_test_app(FaultPlan {
        fail_first_list: false,
        drop_first_cart_read: true,
    });

    let broken = get(app.clone(), "/api/cart").await;
    assert!(broken.into_body().collect().await.is_err());

    let healthy = get(app, "/api/cart").await;
    assert_eq!(healthy.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: health endpoint and CORS preflight
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok() {
    let (app, _) = build_test_app(FaultPlan::none());
    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let (app, _) = build_test_app(FaultPlan::none());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/cart")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PUT")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");
}
