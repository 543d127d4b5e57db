//! Domain types and the `{ status, data }` response envelope shared by the
//! grocery client and the fake backend.
//!
//! Nothing in this crate performs I/O: decoding raw HTTP responses lives in
//! `grocer-client`, serving them lives in `grocer-fake-backend`.

pub mod envelope;
pub mod error;
pub mod types;
