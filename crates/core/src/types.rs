use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Product identifiers are plain integers on the wire.
pub type ItemId = i64;

/// A grocery product as returned by the list and cart endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

/// Server-authoritative cart contents, in insertion order.
pub type Cart = Vec<Item>;

/// Optional narrowing of the grocery list, sent as `?kind=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    Fruits,
    Vegetables,
}

impl Filter {
    /// Wire value of the `kind` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::Fruits => "fruits",
            Filter::Vegetables => "vegetables",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fruits" => Ok(Filter::Fruits),
            "vegetables" => Ok(Filter::Vegetables),
            other => Err(CoreError::InvalidFilter(other.to_string())),
        }
    }
}
