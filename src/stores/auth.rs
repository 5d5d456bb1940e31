use std::sync::Arc;

use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::http::ApiClient;
use crate::session::SessionManager;
use crate::types::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, PasswordRequest, ResendOtpRequest,
    VerifyOtpRequest,
};

/// Login, OTP and password flows.
///
/// Drives the session through `Anonymous → OtpPending → Authenticated`:
/// a login answered with an `OTP_REQUIRED` challenge only remembers the
/// email; the session cookie is written once a token arrives.
#[derive(Debug, Clone)]
pub struct AuthStore {
    client: Arc<ApiClient>,
    dispatcher: Arc<Dispatcher>,
    session: Arc<SessionManager>,
}

impl AuthStore {
    pub fn new(
        client: Arc<ApiClient>,
        dispatcher: Arc<Dispatcher>,
        session: Arc<SessionManager>,
    ) -> Self {
        Self {
            client,
            dispatcher,
            session,
        }
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        self.dispatcher
            .run("auth.login", async {
                let res = self.client.auth().login(req).await?;
                self.session.set_email(&req.email)?;

                if res.requires_otp() {
                    tracing::info!(name: "auth.otp_required", "Login requires OTP verification");
                    return Ok(res);
                }

                self.session.start_user_session(&res.token()?)?;
                Ok(res)
            })
            .await
    }

    pub async fn verify_otp(&self, req: &VerifyOtpRequest) -> Result<AuthResponse> {
        self.dispatcher
            .run("auth.verify_otp", async {
                let res = self.client.auth().verify_otp(req).await?;
                self.session.start_user_session(&res.token()?)?;
                Ok(res)
            })
            .await
    }

    pub async fn resend_otp(&self, req: &ResendOtpRequest) -> Result<Value> {
        self.dispatcher
            .run("auth.resend_otp", async {
                let res = self.client.auth().resend_otp(req).await?;
                self.dispatcher.show_success(
                    "OTP Resent",
                    "A new verification code has been sent to your email",
                );
                Ok(res)
            })
            .await
    }

    pub async fn forgot_password(&self, req: &ForgotPasswordRequest) -> Result<Value> {
        self.dispatcher
            .run("auth.forgot_password", async {
                let res = self.client.auth().forgot_password(req).await?;
                self.dispatcher.show_success(
                    "Password link sent successfully",
                    "Please Check your email for the reset link",
                );
                Ok(res)
            })
            .await
    }

    pub async fn reset_password(&self, req: &PasswordRequest) -> Result<Value> {
        self.dispatcher
            .run("auth.reset_password", async {
                let res = self.client.auth().reset_password(req).await?;
                self.dispatcher.show_success(
                    "Password changed successfully",
                    "Your password has been changed successfully",
                );
                Ok(res)
            })
            .await
    }

    /// First-time password setup signs the user straight in.
    pub async fn setup_password(&self, req: &PasswordRequest) -> Result<AuthResponse> {
        self.dispatcher
            .run("auth.setup_password", async {
                let res = self.client.auth().setup_password(req).await?;
                self.session.start_user_session(&res.token()?)?;
                Ok(res)
            })
            .await
    }

    /// End the session.
    ///
    /// Unlike every other action this does not go through the dispatcher, so a
    /// failed request raises no error notification. Local session state is
    /// cleared either way and the backend's result is returned afterwards.
    pub async fn logout(&self) -> Result<Value> {
        let res = self.client.auth().logout().await;
        if let Err(e) = &res {
            tracing::warn!(name: "auth.logout.failed", error = %e, "Logout request failed; clearing session anyway");
        }
        self.session.clear_session_state()?;
        res
    }
}
