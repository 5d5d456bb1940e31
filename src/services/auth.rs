use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::http::ApiClient;
use crate::types::{
    AuthResponse, Envelope, ForgotPasswordRequest, LoginRequest, PasswordRequest,
    ResendOtpRequest, User, VerifyOtpRequest,
};

/// Auth API client.
#[derive(Debug)]
pub struct AuthApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl AuthApi<'_> {
    /// Submit credentials. The body either carries a token or an OTP challenge.
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        let builder = self.client.request(Method::POST, "auth/login")?.json(req);
        self.client.send_json(builder).await
    }

    pub async fn logout(&self) -> Result<Value> {
        let builder = self.client.request(Method::POST, "auth/logout")?;
        self.client.send_json(builder).await
    }

    pub async fn forgot_password(&self, req: &ForgotPasswordRequest) -> Result<Value> {
        let builder = self
            .client
            .request(Method::POST, "auth/password/forgot")?
            .json(req);
        self.client.send_json(builder).await
    }

    pub async fn reset_password(&self, req: &PasswordRequest) -> Result<Value> {
        let builder = self
            .client
            .request(Method::POST, "auth/password/reset")?
            .json(req);
        self.client.send_json(builder).await
    }

    /// First-time password setup; answers with a token payload.
    pub async fn setup_password(&self, req: &PasswordRequest) -> Result<AuthResponse> {
        let builder = self
            .client
            .request(Method::POST, "auth/password/set")?
            .json(req);
        self.client.send_json(builder).await
    }

    /// The signed-in user.
    pub async fn me(&self) -> Result<Envelope<User>> {
        let builder = self.client.request(Method::GET, "auth/me")?;
        self.client.send_json(builder).await
    }

    pub async fn verify_otp(&self, req: &VerifyOtpRequest) -> Result<AuthResponse> {
        let builder = self
            .client
            .request(Method::POST, "auth/otp/verify")?
            .json(req);
        self.client.send_json(builder).await
    }

    pub async fn resend_otp(&self, req: &ResendOtpRequest) -> Result<Value> {
        let builder = self
            .client
            .request(Method::POST, "auth/otp/resend")?
            .json(req);
        self.client.send_json(builder).await
    }
}
