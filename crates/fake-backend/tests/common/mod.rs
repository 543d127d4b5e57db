use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use grocer_fake_backend::config::{FakeConfig, FaultPlan};
use grocer_fake_backend::router::build_router;
use grocer_fake_backend::state::FakeState;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build the fake router with the given fault plan and no latency.
///
/// Returns the state as well so tests can inspect counters and the cart.
pub fn build_test_app(faults: FaultPlan) -> (Router, FakeState) {
    let state = FakeState::new(FakeConfig {
        faults,
        cors_origins: vec!["http://localhost:5173".to_string()],
        ..Default::default()
    });
    (build_router(state.clone()), state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT with a raw JSON body.
pub async fn put_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
