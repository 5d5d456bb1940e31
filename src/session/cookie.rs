//! The auth cookie: one JSON object under a fixed key in a [`CredentialStore`].

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::storage::CredentialStore;
use crate::types::AuthCookie;

/// Default cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "tmb_cookie";

/// Default cookie lifetime (7 days).
pub const DEFAULT_COOKIE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Typed access to the auth cookie.
///
/// Shared between the HTTP client (which reads the access token) and the
/// session manager (which writes and clears it).
#[derive(Debug, Clone)]
pub struct CookieJar {
    store: Arc<dyn CredentialStore>,
    name: String,
    ttl: Duration,
}

impl CookieJar {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self::with_settings(store, DEFAULT_COOKIE_NAME, DEFAULT_COOKIE_TTL)
    }

    pub fn with_settings(
        store: Arc<dyn CredentialStore>,
        name: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            name: name.into(),
            ttl,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the cookie. A value that no longer parses reads as absent.
    pub fn get(&self) -> Result<Option<AuthCookie>> {
        let Some(raw) = self.store.get(&self.name)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(cookie) => Ok(Some(cookie)),
            Err(e) => {
                tracing::warn!(name: "session.cookie.unreadable", error = %e, "Ignoring malformed auth cookie");
                Ok(None)
            }
        }
    }

    /// Write the cookie with the configured TTL.
    pub fn set(&self, cookie: &AuthCookie) -> Result<()> {
        let raw = serde_json::to_string(cookie)?;
        self.store.set(&self.name, &raw, self.ttl)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.name)
    }

    /// Bearer token for outgoing requests, if a cookie is present.
    pub fn access_token(&self) -> Option<String> {
        match self.get() {
            Ok(Some(cookie)) if !cookie.access_token.is_empty() => Some(cookie.access_token),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(name: "session.cookie.read_failed", error = %e, "Could not read auth cookie");
                None
            }
        }
    }
}
