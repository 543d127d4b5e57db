//! Typed client for the grocery storefront API.
//!
//! Layers, bottom-up:
//!
//! - [`response`] decodes a raw HTTP response into an
//!   [`Envelope`](grocer_core::envelope::Envelope) and unwraps it.
//! - [`api`] holds the three resource accessors behind the [`GroceryApi`]
//!   trait, with an HTTP implementation over [`reqwest`].
//! - [`query`] and [`cache`] bind accessors to cache keys and declare which
//!   keys a mutation invalidates.
//! - [`query_client`] ties the accessors to the cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod params;
pub mod query;
pub mod query_client;
pub mod response;

pub use api::{GroceryApi, HttpGroceryApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use query::QueryKey;
pub use query_client::QueryClient;
