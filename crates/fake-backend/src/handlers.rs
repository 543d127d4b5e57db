//! Handlers for the `/api/list` and `/api/cart` resources.

use std::io;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use grocer_core::types::{Cart, Filter, Item};
use serde::Deserialize;
use serde_json::Value;

use crate::catalog;
use crate::error::{FakeError, FakeResult};
use crate::response::DataResponse;
use crate::state::FakeState;

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Raw `kind` value. Anything other than a known filter lists everything.
    pub kind: Option<String>,
}

/// GET /api/list
///
/// List catalogue items, optionally narrowed by `?kind=`.
pub async fn list_items(
    State(state): State<FakeState>,
    Query(params): Query<ListQuery>,
) -> FakeResult<DataResponse<Vec<Item>>> {
    state.counters.record_list();
    let filter = params.kind.as_deref().and_then(|k| k.parse::<Filter>().ok());
    tracing::debug!(kind = ?params.kind, ?filter, "Listing items");

    pause(state.config.read_delay).await;

    if state.faults.take_list() {
        return Err(FakeError::Maintenance);
    }

    Ok(DataResponse {
        data: catalog::list(filter),
    })
}

/// GET /api/cart
///
/// Return the current cart. When the cart-read fault is armed, the response
/// body errors out so the connection is dropped mid-response.
pub async fn get_cart(State(state): State<FakeState>) -> Response {
    state.counters.record_cart_read();

    pause(state.config.read_delay).await;

    if state.faults.take_cart_read() {
        tracing::warn!("Dropping cart read connection");
        return broken_response();
    }

    DataResponse {
        data: state.cart_snapshot().await,
    }
    .into_response()
}

/// PUT /api/cart
///
/// Body is a JSON number naming the item to add. Returns the full updated
/// cart.
pub async fn add_to_cart(
    State(state): State<FakeState>,
    body: Bytes,
) -> FakeResult<DataResponse<Cart>> {
    state.counters.record_cart_write();

    pause(state.config.write_delay).await;

    let value: Value = serde_json::from_slice(&body).map_err(|_| FakeError::InvalidItemId)?;
    if !value.is_number() {
        tracing::debug!(body = %value, "Rejecting non-numeric item id");
        return Err(FakeError::InvalidItemId);
    }

    let item = value
        .as_i64()
        .and_then(catalog::find)
        .ok_or(FakeError::ItemNotFound)?;

    tracing::info!(item_id = item.id, name = %item.name, "Adding item to cart");
    let cart = state.push_to_cart(item).await;

    Ok(DataResponse { data: cart })
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// A 200 whose body stream fails immediately, which makes hyper abort the
/// connection before a complete response reaches the client.
fn broken_response() -> Response {
    let stream = futures::stream::once(async {
        Err::<Bytes, io::Error>(io::Error::new(
            io::ErrorKind::ConnectionAborted,
            "injected transport failure",
        ))
    });

    (StatusCode::OK, Body::from_stream(stream)).into_response()
}
