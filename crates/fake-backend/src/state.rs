use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use grocer_core::types::{Cart, Item};
use tokio::sync::RwLock;

use crate::config::FakeConfig;

/// Shared fake-backend state available to all handlers via `State<FakeState>`.
///
/// Cheaply cloneable; every field is behind an `Arc`.
#[derive(Clone)]
pub struct FakeState {
    pub config: Arc<FakeConfig>,
    /// In-memory cart, appended to by `PUT /api/cart`.
    pub cart: Arc<RwLock<Cart>>,
    pub faults: Arc<ArmedFaults>,
    pub counters: Arc<RequestCounters>,
}

impl FakeState {
    pub fn new(config: FakeConfig) -> Self {
        let faults = ArmedFaults {
            list: AtomicBool::new(config.faults.fail_first_list),
            cart_read: AtomicBool::new(config.faults.drop_first_cart_read),
        };
        Self {
            config: Arc::new(config),
            cart: Arc::new(RwLock::new(Vec::new())),
            faults: Arc::new(faults),
            counters: Arc::new(RequestCounters::default()),
        }
    }

    /// Current cart contents.
    pub async fn cart_snapshot(&self) -> Cart {
        self.cart.read().await.clone()
    }

    /// Append an item and return the updated cart.
    pub async fn push_to_cart(&self, item: Item) -> Cart {
        let mut cart = self.cart.write().await;
        cart.push(item);
        cart.clone()
    }
}

/// Faults still waiting to fire.
#[derive(Debug)]
pub struct ArmedFaults {
    list: AtomicBool,
    cart_read: AtomicBool,
}

impl ArmedFaults {
    /// Disarm and report whether the list fault was armed.
    pub fn take_list(&self) -> bool {
        self.list.swap(false, Ordering::SeqCst)
    }

    /// Disarm and report whether the cart-read fault was armed.
    pub fn take_cart_read(&self) -> bool {
        self.cart_read.swap(false, Ordering::SeqCst)
    }
}

/// Per-endpoint request counts, used by tests to observe re-fetches.
#[derive(Debug, Default)]
pub struct RequestCounters {
    list: AtomicUsize,
    cart_reads: AtomicUsize,
    cart_writes: AtomicUsize,
}

impl RequestCounters {
    pub(crate) fn record_list(&self) {
        self.list.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_cart_read(&self) {
        self.cart_reads.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_cart_write(&self) {
        self.cart_writes.fetch_add(1, Ordering::SeqCst);
    }

    pub fn list_requests(&self) -> usize {
        self.list.load(Ordering::SeqCst)
    }

    pub fn cart_reads(&self) -> usize {
        self.cart_reads.load(Ordering::SeqCst)
    }

    pub fn cart_writes(&self) -> usize {
        self.cart_writes.load(Ordering::SeqCst)
    }
}
