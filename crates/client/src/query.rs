//! Cache keys and invalidation bindings.
//!
//! Each read accessor has a structurally comparable [`QueryKey`]; each
//! mutation declares the keys it invalidates on success.

use std::fmt;

use grocer_core::types::Filter;

/// Identifies one logical cached resource.
///
/// Two reads with equal keys share a cache entry; `GroceryList(None)` and
/// `GroceryList(Some(Fruits))` never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `("grocery-list", filter)`
    GroceryList(Option<Filter>),
    /// `("cart",)`
    Cart,
}

impl QueryKey {
    pub fn grocery_list(filter: Option<Filter>) -> Self {
        QueryKey::GroceryList(filter)
    }

    /// Resource name, the first key segment.
    pub fn resource(&self) -> &'static str {
        match self {
            QueryKey::GroceryList(_) => "grocery-list",
            QueryKey::Cart => "cart",
        }
    }

    /// Full key as segments, e.g. `["grocery-list", "fruits"]`.
    pub fn segments(&self) -> Vec<&'static str> {
        match self {
            QueryKey::GroceryList(Some(filter)) => vec![self.resource(), filter.as_str()],
            QueryKey::GroceryList(None) | QueryKey::Cart => vec![self.resource()],
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join("/"))
    }
}

/// Write operations and the cache keys their success invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    AddToCart,
}

impl Mutation {
    /// Keys marked stale after this mutation succeeds. Failed mutations
    /// invalidate nothing.
    pub fn invalidates(self) -> &'static [QueryKey] {
        match self {
            Mutation::AddToCart => &[QueryKey::Cart],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn filtered_and_unfiltered_lists_are_distinct_keys() {
        let all = QueryKey::grocery_list(None);
        let fruits = QueryKey::grocery_list(Some(Filter::Fruits));

        assert_ne!(all, fruits);
        let keys: HashSet<_> = [all, fruits, QueryKey::grocery_list(None)].into_iter().collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn segments_match_resource_names() {
        assert_eq!(QueryKey::grocery_list(None).segments(), vec!["grocery-list"]);
        assert_eq!(
            QueryKey::grocery_list(Some(Filter::Fruits)).segments(),
            vec!["grocery-list", "fruits"]
        );
        assert_eq!(QueryKey::Cart.segments(), vec!["cart"]);
        assert_eq!(
            QueryKey::grocery_list(Some(Filter::Vegetables)).to_string(),
            "grocery-list/vegetables"
        );
    }

    #[test]
    fn add_to_cart_only_invalidates_cart() {
        assert_eq!(Mutation::AddToCart.invalidates(), &[QueryKey::Cart]);
    }
}
