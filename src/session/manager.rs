use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::CookieJar;
use crate::error::Result;
use crate::http::ApiClient;
use crate::storage::SessionStorage;
use crate::types::{AuthCookie, TokenPayload, User};

/// Session storage key for the email used during a multi-step login.
pub const EMAIL_KEY: &str = "email";

/// Session storage key for the pending redirect target.
pub const INTENDED_ROUTE_KEY: &str = "intendedRoute";

/// Where the user stands in the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    Anonymous,
    /// Credentials accepted, one-time passcode still outstanding.
    OtpPending { email: String },
    Authenticated,
}

/// Owns the auth cookie, the in-memory user and the intended route.
///
/// Constructed once per application and shared behind an `Arc`; every field
/// is interior-mutable so concurrent callers see last-write-wins semantics.
#[derive(Debug)]
pub struct SessionManager {
    client: Arc<ApiClient>,
    cookies: CookieJar,
    storage: Arc<dyn SessionStorage>,
    user: RwLock<Option<User>>,
    intended_route: RwLock<Option<String>>,
}

impl SessionManager {
    /// Create a manager, restoring a persisted intended route.
    pub fn new(
        client: Arc<ApiClient>,
        cookies: CookieJar,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let intended = storage.get_item(INTENDED_ROUTE_KEY).unwrap_or_else(|e| {
            tracing::warn!(name: "session.intended.restore_failed", error = %e, "Could not restore intended route");
            None
        });
        Self {
            client,
            cookies,
            storage,
            user: RwLock::new(None),
            intended_route: RwLock::new(intended),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cookie
    // ─────────────────────────────────────────────────────────────────────────

    /// Persist a freshly issued token.
    ///
    /// `expires_in` is converted from a relative lifetime in seconds into an
    /// absolute epoch-millisecond timestamp. Fields of an existing cookie that
    /// the payload does not mention are kept.
    pub fn start_user_session(&self, token: &TokenPayload) -> Result<AuthCookie> {
        self.start_user_session_at(token, Utc::now())
    }

    pub(crate) fn start_user_session_at(
        &self,
        token: &TokenPayload,
        now: DateTime<Utc>,
    ) -> Result<AuthCookie> {
        let mut cookie = self.cookies.get()?.unwrap_or_default();
        cookie.access_token.clone_from(&token.access_token);
        cookie.expires_in = now
            .timestamp_millis()
            .saturating_add(token.expires_in.saturating_mul(1000));
        if let Some(refresh) = &token.refresh_token {
            cookie.refresh_token = Some(refresh.clone());
        }
        self.cookies.set(&cookie)?;

        tracing::info!(
            name: "session.started",
            expires_at = cookie.expires_in,
            has_refresh_token = cookie.refresh_token.is_some(),
            "User session started"
        );
        Ok(cookie)
    }

    /// Remove the cookie, the remembered email and the cached user.
    pub fn clear_session_state(&self) -> Result<()> {
        self.cookies.clear()?;
        self.storage.remove_item(EMAIL_KEY)?;
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::info!(name: "session.cleared", "User session cleared");
        Ok(())
    }

    pub fn get_cookie(&self) -> Result<Option<AuthCookie>> {
        self.cookies.get()
    }

    pub fn set_cookie(&self, cookie: &AuthCookie) -> Result<()> {
        self.cookies.set(cookie)
    }

    pub fn access_token(&self) -> Option<String> {
        self.cookies.access_token()
    }

    /// A present cookie is what route guards treat as "signed in".
    pub fn is_authenticated(&self) -> bool {
        matches!(self.cookies.get(), Ok(Some(_)))
    }

    pub fn state(&self) -> AuthState {
        if self.is_authenticated() {
            return AuthState::Authenticated;
        }
        match self.get_email() {
            Ok(Some(email)) => AuthState::OtpPending { email },
            _ => AuthState::Anonymous,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the current user and cache it. Errors are returned as-is.
    pub async fn me(&self) -> Result<User> {
        let user = self.client.auth().me().await?.data;
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        Ok(user)
    }

    /// The cached user, if [`me`](Self::me) has succeeded since the last clear.
    pub fn user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session storage
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_email(&self, email: &str) -> Result<()> {
        self.storage.set_item(EMAIL_KEY, email)
    }

    pub fn get_email(&self) -> Result<Option<String>> {
        self.storage.get_item(EMAIL_KEY)
    }

    /// Remember where to go after login.
    pub fn set_intended(&self, route: &str) -> Result<()> {
        *self
            .intended_route
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(route.to_string());
        self.storage.set_item(INTENDED_ROUTE_KEY, route)
    }

    /// Take the pending redirect target. A second call returns `None`.
    pub fn consume_intended(&self) -> Result<Option<String>> {
        let route = self
            .intended_route
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.storage.remove_item(INTENDED_ROUTE_KEY)?;
        Ok(route)
    }
}
