//! Accessors bound to cache keys.
//!
//! [`QueryClient`] is what a UI talks to: reads go through the cache, the
//! cart mutation invalidates the cart key on success, and failed reads stay
//! failed until the user asks for a retry with [`QueryClient::reset`] or a
//! mutation invalidates them.

use grocer_core::types::{Cart, Filter, Item, ItemId};

use crate::api::GroceryApi;
use crate::cache::{Lookup, QueryCache, QuerySnapshot, SharedError};
use crate::error::ClientResult;
use crate::query::{Mutation, QueryKey};

/// Result of a cached read.
pub type QueryResult<T> = Result<T, SharedError>;

pub struct QueryClient<A> {
    api: A,
    cache: QueryCache<Vec<Item>>,
}

impl<A: GroceryApi> QueryClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &QueryCache<Vec<Item>> {
        &self.cache
    }

    /// Grocery list for `filter`, cached under `("grocery-list", filter)`.
    pub async fn grocery_list(&self, filter: Option<Filter>) -> QueryResult<Vec<Item>> {
        self.read(QueryKey::grocery_list(filter)).await
    }

    /// Cart contents, cached under `("cart",)`.
    pub async fn cart(&self) -> QueryResult<Cart> {
        self.read(QueryKey::Cart).await
    }

    /// Read `key` from the cache, fetching when it is empty or stale.
    ///
    /// A cached failure is returned as-is; nothing is retried automatically.
    pub async fn read(&self, key: QueryKey) -> QueryResult<Vec<Item>> {
        match self.cache.lookup(key).await {
            Lookup::Hit(data) => Ok(data),
            Lookup::Failed(err) => Err(err),
            Lookup::Miss => {
                let ticket = self.cache.begin_fetch(key).await;
                let result = self.fetch(key).await;
                self.cache.complete_fetch(ticket, result).await
            }
        }
    }

    async fn fetch(&self, key: QueryKey) -> ClientResult<Vec<Item>> {
        match key {
            QueryKey::GroceryList(filter) => self.api.fetch_list(filter).await,
            QueryKey::Cart => self.api.fetch_cart().await,
        }
    }

    /// Add an item to the cart.
    ///
    /// On success the keys bound to [`Mutation::AddToCart`] are invalidated
    /// and the server's cart snapshot is returned. On failure the cache is
    /// left untouched.
    pub async fn add_to_cart(&self, id: ItemId) -> ClientResult<Cart> {
        let cart = self.api.add_to_cart(id).await?;
        for key in Mutation::AddToCart.invalidates() {
            self.cache.invalidate(*key).await;
        }
        Ok(cart)
    }

    pub async fn invalidate(&self, key: QueryKey) -> bool {
        self.cache.invalidate(key).await
    }

    /// User-initiated retry: clear a cached failure for `key`.
    pub async fn reset(&self, key: QueryKey) {
        self.cache.reset(key).await;
    }

    pub async fn snapshot(&self, key: QueryKey) -> QuerySnapshot<Vec<Item>> {
        self.cache.snapshot(key).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use grocer_core::envelope::{ApiError, ApiErrorBody};
    use tokio::sync::Mutex;

    use super::*;
    use crate::cache::QueryStatus;
    use crate::error::ClientError;

    fn item(id: ItemId, name: &str) -> Item {
        Item {
            id,
            name: name.into(),
        }
    }

    fn api_error(message: &str) -> ClientError {
        ClientError::Api(ApiError {
            data: ApiErrorBody::new(message),
        })
    }

    /// Accessor double that replays queued cart responses and counts calls.
    #[derive(Default)]
    struct ScriptedApi {
        list_calls: AtomicUsize,
        cart_calls: AtomicUsize,
        cart_reads: Mutex<VecDeque<ClientResult<Cart>>>,
        cart_writes: Mutex<VecDeque<ClientResult<Cart>>>,
    }

    #[async_trait]
    impl GroceryApi for ScriptedApi {
        async fn fetch_list(&self, filter: Option<Filter>) -> ClientResult<Vec<Item>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(match filter {
                Some(Filter::Fruits) => vec![item(1, "Apple")],
                _ => vec![item(1, "Apple"), item(11, "Lemon")],
            })
        }

        async fn fetch_cart(&self) -> ClientResult<Cart> {
            self.cart_calls.fetch_add(1, Ordering::SeqCst);
            self.cart_reads
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn add_to_cart(&self, _id: ItemId) -> ClientResult<Cart> {
            self.cart_writes
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    #[tokio::test]
    async fn repeated_reads_hit_the_cache() {
        let client = QueryClient::new(ScriptedApi::default());

        client.grocery_list(None).await.unwrap();
        client.grocery_list(None).await.unwrap();

        assert_eq!(client.api().list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn filters_are_cached_separately() {
        let client = QueryClient::new(ScriptedApi::default());

        let all = client.grocery_list(None).await.unwrap();
        let fruits = client.grocery_list(Some(Filter::Fruits)).await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(fruits.len(), 1);
        assert_eq!(client.api().list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn successful_mutation_forces_cart_refetch() {
        let api = ScriptedApi::default();
        api.cart_reads.lock().await.extend([
            Ok(vec![]),
            Ok(vec![item(1, "Apple")]),
        ]);
        api.cart_writes.lock().await.push_back(Ok(vec![item(1, "Apple")]));
        let client = QueryClient::new(api);

        assert!(client.cart().await.unwrap().is_empty());
        client.grocery_list(None).await.unwrap();

        let snapshot = client.add_to_cart(1).await.unwrap();
        assert_eq!(snapshot, vec![item(1, "Apple")]);

        assert_eq!(client.cart().await.unwrap(), vec![item(1, "Apple")]);
        assert_eq!(client.api().cart_calls.load(Ordering::SeqCst), 2);

        // The list was not invalidated.
        client.grocery_list(None).await.unwrap();
        assert_eq!(client.api().list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_mutation_leaves_cart_untouched() {
        let api = ScriptedApi::default();
        api.cart_reads.lock().await.push_back(Ok(vec![item(2, "Banana")]));
        api.cart_writes.lock().await.push_back(Err(api_error("Item not found")));
        let client = QueryClient::new(api);

        client.cart().await.unwrap();
        let err = client.add_to_cart(999).await.unwrap_err();
        assert_eq!(err.user_message(), "Item not found");

        assert_matches!(
            client.snapshot(QueryKey::Cart).await.status,
            QueryStatus::Fresh(ref cart) if *cart == vec![item(2, "Banana")]
        );
        client.cart().await.unwrap();
        assert_eq!(client.api().cart_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_read_is_sticky_until_reset() {
        let api = ScriptedApi::default();
        api.cart_reads.lock().await.extend([
            Err(api_error("down")),
            Ok(vec![item(3, "Cherry")]),
        ]);
        let client = QueryClient::new(api);

        assert!(client.cart().await.is_err());
        let cached = client.cart().await.unwrap_err();
        assert_eq!(cached.user_message(), "down");
        assert_eq!(client.api().cart_calls.load(Ordering::SeqCst), 1);

        client.reset(QueryKey::Cart).await;
        assert_eq!(client.cart().await.unwrap(), vec![item(3, "Cherry")]);
        assert_eq!(client.api().cart_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn mutation_clears_failed_cart_read() {
        let api = ScriptedApi::default();
        api.cart_reads.lock().await.extend([
            Err(api_error("down")),
            Ok(vec![item(4, "Dates")]),
        ]);
        api.cart_writes.lock().await.push_back(Ok(vec![item(4, "Dates")]));
        let client = QueryClient::new(api);

        assert!(client.cart().await.is_err());
        client.add_to_cart(4).await.unwrap();

        assert_eq!(client.cart().await.unwrap(), vec![item(4, "Dates")]);
        assert_eq!(client.api().cart_calls.load(Ordering::SeqCst), 2);
    }
}
