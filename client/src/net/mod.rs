//! Networking modules for the backend API and the chat event stream.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the `ApiClient` seam and its HTTP implementation, `mock`
//! the canned in-browser backend, `sse` the incremental event-stream decoder,
//! and `types` the shared wire schema.

pub mod api;
pub mod mock;
pub mod sse;
pub mod types;
