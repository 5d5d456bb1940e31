//! HTTP adapter.
//!
//! [`ApiClient`] resolves paths under the backend's `/api/` root, attaches the
//! bearer token and turns non-2xx responses into [`crate::Error::Api`]. The
//! per-resource endpoint wrappers live in [`crate::services`] and hang off the
//! client as accessors (`client.plans()`, `client.auth()`, ...).

mod client;

pub use client::ApiClient;
