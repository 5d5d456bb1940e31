//! Shared request/response types.
//!
//! Domain records (plans, menus, templates, ...) are owned by the backend and
//! travel as opaque [`serde_json::Value`] bodies. Only the auth payloads the
//! client itself inspects are typed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Auth Types
// =============================================================================

/// Backend challenge value meaning a one-time passcode must be verified.
pub const OTP_REQUIRED: &str = "OTP_REQUIRED";

/// Credentials submitted to `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// One-time passcode verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Request for a fresh one-time passcode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

/// Request for a password reset link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Password reset or first-time password setup.
///
/// Both flows carry the token from the emailed link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequest {
    pub email: String,
    pub token: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Token payload returned by login, OTP verification and password setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub access_token: String,
    /// Lifetime in seconds, relative to the response.
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Body returned by the auth endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl AuthResponse {
    /// Whether the backend asked for OTP verification before issuing a token.
    pub fn requires_otp(&self) -> bool {
        self.challenge.as_deref() == Some(OTP_REQUIRED)
    }

    /// Token payload carried in `data`.
    pub fn token(&self) -> crate::Result<TokenPayload> {
        let data = self.data.clone().ok_or(crate::Error::MissingToken)?;
        serde_json::from_value(data).map_err(|e| {
            tracing::debug!(name: "auth.token.malformed", error = %e, "Token payload did not decode");
            crate::Error::MissingToken
        })
    }
}

/// The persisted auth credential.
///
/// Unknown fields already present in the stored object are carried through
/// every rewrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthCookie {
    #[serde(default)]
    pub access_token: String,
    /// Absolute expiry as epoch milliseconds.
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthCookie {
    /// Whether the access token's own expiry has passed.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_in <= now_ms
    }
}

/// The signed-in user as returned by `/auth/me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Standard `{ "data": ... }` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Query string parameters, serialized in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(Vec<(String, String)>);

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to append a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}
