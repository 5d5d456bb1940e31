//! Durable credential and session-scoped storage.
//!
//! The session manager never touches a concrete store. It talks to two
//! interfaces:
//!
//! - [`CredentialStore`]: a key-value credential cache whose entries expire
//!   after a TTL (the auth cookie lives here).
//! - [`SessionStorage`]: plain key-value storage scoped to one interactive
//!   session (remembered email, intended route).
//!
//! Both are implemented by [`MemoryStore`] and [`FileStore`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tmb_admin::storage::{CredentialStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("tmb_cookie", "{}", Duration::from_secs(60)).unwrap();
//! assert_eq!(store.get("tmb_cookie").unwrap().as_deref(), Some("{}"));
//! ```

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Key-value credential cache with per-entry expiry.
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// Read a live entry. Expired entries read as absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write an entry that expires after `ttl`, replacing any previous value.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Delete an entry. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Key-value storage scoped to one interactive session.
pub trait SessionStorage: Send + Sync + std::fmt::Debug {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// A stored value with an optional absolute expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Entry {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn persistent(value: &str) -> Self {
        Self {
            value: value.to_string(),
            expires_at: None,
        }
    }

    pub fn expiring(value: &str, ttl: Duration) -> Result<Self> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| crate::Error::Storage(format!("invalid ttl: {e}")))?;
        Ok(Self {
            value: value.to_string(),
            expires_at: Some(Utc::now() + ttl),
        })
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}
