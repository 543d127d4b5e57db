//! In-memory fake of the grocery REST backend.
//!
//! Serves the three grocery endpoints with a fixed catalogue, an in-memory
//! cart, optional one-shot fault injection and configurable latency. The
//! client test suites spawn it on an ephemeral port; the binary runs it
//! standalone for manual testing of the CLI.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod server;
pub mod state;
