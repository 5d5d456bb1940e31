//! Endpoint wrappers, one module per backend resource.
//!
//! Each function maps 1:1 to an endpoint and verb and returns the decoded
//! response body. Nothing here validates, retries or translates errors.

mod auth;
mod dashboard;
mod email_configuration;
mod email_templates;
mod menus;
mod plans;
mod quickbooks;

pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use email_configuration::EmailConfigurationApi;
pub use email_templates::EmailTemplatesApi;
pub use menus::MenusApi;
pub use plans::PlansApi;
pub use quickbooks::QuickBooksApi;

use crate::http::ApiClient;

// ─────────────────────────────────────────────────────────────────────────────
// API Accessors
// ─────────────────────────────────────────────────────────────────────────────

impl ApiClient {
    /// Access the Auth API.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    /// Access the Plans API.
    pub fn plans(&self) -> PlansApi<'_> {
        PlansApi { client: self }
    }

    /// Access the Menus API.
    pub fn menus(&self) -> MenusApi<'_> {
        MenusApi { client: self }
    }

    /// Access the Email Templates API.
    pub fn email_templates(&self) -> EmailTemplatesApi<'_> {
        EmailTemplatesApi { client: self }
    }

    /// Access the Email Configuration API.
    pub fn email_configuration(&self) -> EmailConfigurationApi<'_> {
        EmailConfigurationApi { client: self }
    }

    /// Access the QuickBooks integration API.
    pub fn quickbooks(&self) -> QuickBooksApi<'_> {
        QuickBooksApi { client: self }
    }

    /// Access the Dashboard API.
    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi { client: self }
    }
}
