//! Resource accessors for the grocery endpoints.
//!
//! Each accessor builds one request, sends it, decodes the envelope and
//! unwraps it. Failures propagate untouched: there is no retry or fallback
//! at this layer.

use async_trait::async_trait;
use grocer_core::types::{Cart, Filter, Item, ItemId};
use reqwest::Url;
use serde_json::json;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::params::with_search_params;
use crate::response::unwrap_response;

const LIST_PATH: &str = "/api/list";
const CART_PATH: &str = "/api/cart";

/// The three grocery operations.
///
/// Implemented over HTTP by [`HttpGroceryApi`]; the query layer only sees
/// this trait.
#[async_trait]
pub trait GroceryApi: Send + Sync {
    /// `GET /api/list`, with `?kind=` only when a filter is given.
    async fn fetch_list(&self, filter: Option<Filter>) -> ClientResult<Vec<Item>>;

    /// `GET /api/cart`.
    async fn fetch_cart(&self) -> ClientResult<Cart>;

    /// `PUT /api/cart` with the item id as a JSON number.
    ///
    /// Returns the full updated cart as reported by the server.
    async fn add_to_cart(&self, id: ItemId) -> ClientResult<Cart>;
}

/// HTTP client for a grocery API origin.
#[derive(Debug, Clone)]
pub struct HttpGroceryApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpGroceryApi {
    /// Create an accessor set from configuration, building a fresh
    /// [`reqwest::Client`] with the configured timeout.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            client: config.http_client()?,
            base_url: config.base_url.clone(),
        })
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}{path}: {e}", self.base_url)))
    }
}

#[async_trait]
impl GroceryApi for HttpGroceryApi {
    async fn fetch_list(&self, filter: Option<Filter>) -> ClientResult<Vec<Item>> {
        let url = with_search_params(
            self.endpoint(LIST_PATH)?,
            &json!({ "kind": filter.map(Filter::as_str) }),
        );
        tracing::debug!(%url, "GET grocery list");

        let response = self.client.get(url).send().await?;
        unwrap_response(response).await
    }

    async fn fetch_cart(&self) -> ClientResult<Cart> {
        let url = self.endpoint(CART_PATH)?;
        tracing::debug!(%url, "GET cart");

        let response = self.client.get(url).send().await?;
        unwrap_response(response).await
    }

    async fn add_to_cart(&self, id: ItemId) -> ClientResult<Cart> {
        let url = self.endpoint(CART_PATH)?;
        tracing::debug!(%url, item_id = id, "PUT cart");

        let response = self.client.put(url).json(&id).send().await?;
        let cart: Cart = unwrap_response(response).await?;

        tracing::info!(item_id = id, cart_len = cart.len(), "Item added to cart");
        Ok(cart)
    }
}
