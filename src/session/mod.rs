//! Session lifecycle: auth cookie, current user and intended route.
//!
//! # Architecture
//!
//! - [`CookieJar`]: typed access to the auth cookie in a
//!   [`CredentialStore`](crate::storage::CredentialStore)
//! - [`SessionManager`]: starts and clears sessions, caches the current user,
//!   remembers the login email and the route to resume after login
//! - [`AuthState`]: where the user stands in the login flow
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tmb_admin::http::ApiClient;
//! use tmb_admin::session::{AuthState, CookieJar, SessionManager};
//! use tmb_admin::storage::MemoryStore;
//! use tmb_admin::types::TokenPayload;
//!
//! let store = Arc::new(MemoryStore::new());
//! let cookies = CookieJar::new(store.clone());
//! let client = Arc::new(ApiClient::new("http://localhost:8000").unwrap().with_cookies(cookies.clone()));
//! let session = SessionManager::new(client, cookies, store);
//!
//! session.start_user_session(&TokenPayload {
//!     access_token: "token".to_string(),
//!     expires_in: 3600,
//!     refresh_token: None,
//! }).unwrap();
//! assert_eq!(session.state(), AuthState::Authenticated);
//! ```

mod cookie;
mod manager;

pub use cookie::{CookieJar, DEFAULT_COOKIE_NAME, DEFAULT_COOKIE_TTL};
pub use manager::{AuthState, EMAIL_KEY, INTENDED_ROUTE_KEY, SessionManager};
