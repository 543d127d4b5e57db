//! Keyed store of unwrapped payloads.
//!
//! Every entry carries a generation counter. Starting a fetch, invalidating
//! and resetting all bump it, and a fetch result is only stored if its
//! generation is still current. A slow response that was superseded by a
//! newer fetch or an invalidation is therefore dropped instead of
//! overwriting newer state.
//!
//! An entry never holds data and an error at the same time: a failed fetch
//! replaces whatever data was there.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::ClientError;
use crate::query::QueryKey;

/// Errors are shared between the cache and every reader of the entry.
pub type SharedError = Arc<ClientError>;

/// Cached state of one key.
#[derive(Debug, Clone)]
pub enum QueryStatus<V> {
    /// Never fetched, or reset after a failure.
    Empty,
    /// Last fetch succeeded and nothing invalidated it since.
    Fresh(V),
    /// Data from before an invalidation; the next read re-fetches.
    Stale(V),
    /// Last fetch failed. Served until the key is reset or invalidated.
    Failed(SharedError),
}

/// What a UI needs to render one key.
#[derive(Debug, Clone)]
pub struct QuerySnapshot<V> {
    pub status: QueryStatus<V>,
    /// A fetch for this key is in flight.
    pub is_fetching: bool,
}

impl<V> QuerySnapshot<V> {
    /// No data yet and a fetch is outstanding.
    pub fn is_pending(&self) -> bool {
        self.is_fetching && matches!(self.status, QueryStatus::Empty)
    }

    /// The next read of this key goes to the network.
    pub fn needs_fetch(&self) -> bool {
        matches!(self.status, QueryStatus::Empty | QueryStatus::Stale(_))
    }

    /// Data to display, fresh or stale. `None` when empty or failed.
    pub fn data(&self) -> Option<&V> {
        match &self.status {
            QueryStatus::Fresh(v) | QueryStatus::Stale(v) => Some(v),
            QueryStatus::Empty | QueryStatus::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SharedError> {
        match &self.status {
            QueryStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of consulting the cache before a read.
#[derive(Debug)]
pub enum Lookup<V> {
    /// Fresh data, no fetch needed.
    Hit(V),
    /// The last fetch failed and has not been reset or invalidated since.
    Failed(SharedError),
    /// Empty or stale; the caller must fetch.
    Miss,
}

/// Proof that a fetch was started for `key` at `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: QueryKey,
    pub generation: u64,
}

#[derive(Debug)]
struct Entry<V> {
    status: QueryStatus<V>,
    generation: u64,
    fetching: bool,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Empty,
            generation: 0,
            fetching: false,
        }
    }
}

/// Thread-safe payload cache keyed by [`QueryKey`].
#[derive(Debug)]
pub struct QueryCache<V> {
    entries: RwLock<HashMap<QueryKey, Entry<V>>>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lookup(&self, key: QueryKey) -> Lookup<V> {
        let entries = self.entries.read().await;
        match entries.get(&key).map(|e| &e.status) {
            Some(QueryStatus::Fresh(v)) => Lookup::Hit(v.clone()),
            Some(QueryStatus::Failed(err)) => Lookup::Failed(Arc::clone(err)),
            Some(QueryStatus::Stale(_)) | Some(QueryStatus::Empty) | None => Lookup::Miss,
        }
    }

    /// Register a new fetch for `key`, superseding any fetch in flight.
    pub async fn begin_fetch(&self, key: QueryKey) -> FetchTicket {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(key).or_default();
        entry.generation += 1;
        entry.fetching = true;
        FetchTicket {
            key,
            generation: entry.generation,
        }
    }

    /// Store the outcome of a fetch if it is still current.
    ///
    /// The caller always gets its own result back, stored or not.
    pub async fn complete_fetch(
        &self,
        ticket: FetchTicket,
        result: Result<V, ClientError>,
    ) -> Result<V, SharedError> {
        let result = result.map_err(Arc::new);

        let mut entries = self.entries.write().await;
        let entry = entries.entry(ticket.key).or_default();
        if entry.generation != ticket.generation {
            tracing::debug!(
                key = %ticket.key,
                ticket = ticket.generation,
                current = entry.generation,
                "Discarding superseded fetch result",
            );
            return result;
        }

        entry.fetching = false;
        entry.status = match &result {
            Ok(value) => QueryStatus::Fresh(value.clone()),
            Err(err) => QueryStatus::Failed(Arc::clone(err)),
        };
        result
    }

    /// Mark `key` stale so the next read re-fetches.
    ///
    /// Data becomes [`QueryStatus::Stale`]; a cached failure is cleared.
    /// Any fetch in flight for `key` is superseded. Returns whether the key
    /// had an entry.
    pub async fn invalidate(&self, key: QueryKey) -> bool {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(&key) else {
            return false;
        };

        entry.generation += 1;
        entry.fetching = false;
        let status = std::mem::replace(&mut entry.status, QueryStatus::Empty);
        entry.status = match status {
            QueryStatus::Fresh(v) | QueryStatus::Stale(v) => QueryStatus::Stale(v),
            QueryStatus::Failed(_) | QueryStatus::Empty => QueryStatus::Empty,
        };
        tracing::debug!(%key, "Invalidated query");
        true
    }

    /// Clear a failure so the next read retries. Data entries are left as
    /// they are.
    pub async fn reset(&self, key: QueryKey) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(&key) {
            if matches!(entry.status, QueryStatus::Failed(_)) {
                entry.generation += 1;
                entry.fetching = false;
                entry.status = QueryStatus::Empty;
                tracing::debug!(%key, "Reset failed query");
            }
        }
    }

    pub async fn snapshot(&self, key: QueryKey) -> QuerySnapshot<V> {
        let entries = self.entries.read().await;
        match entries.get(&key) {
            Some(entry) => QuerySnapshot {
                status: entry.status.clone(),
                is_fetching: entry.fetching,
            },
            None => QuerySnapshot {
                status: QueryStatus::Empty,
                is_fetching: false,
            },
        }
    }
}
