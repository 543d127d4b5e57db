//! Plain-text rendering of storefront state.

use grocer_client::cache::SharedError;
use grocer_client::ClientError;
use grocer_core::types::{Filter, Item};

pub const RETRY_HINT: &str = "type `retry` to try again";

/// Printed before a read that goes to the network.
pub const LOADING_LIST: &str = "  Loading grocery list...\n";
pub const LOADING_CART: &str = "Loading cart...\n";

pub fn filter_label(filter: Option<Filter>) -> &'static str {
    match filter {
        Some(Filter::Fruits) => "Only fruits",
        Some(Filter::Vegetables) => "Only vegetables",
        None => "All",
    }
}

pub fn items(items: &[Item]) -> String {
    if items.is_empty() {
        return "  (nothing here)\n".to_string();
    }
    items
        .iter()
        .map(|item| format!("  #{:<3} {}\n", item.id, item.name))
        .collect()
}

pub fn cart_count(result: &Result<Vec<Item>, SharedError>) -> String {
    match result {
        Ok(cart) => format!("Element in the cart: {}\n", cart.len()),
        Err(_) => format!("Element in the cart: Error occurred, {RETRY_HINT}\n"),
    }
}

pub fn error(err: &ClientError) -> String {
    format!("{}\n", err.user_message())
}
