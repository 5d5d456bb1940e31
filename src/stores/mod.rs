//! Domain stores.
//!
//! One store per backend resource. A store composes the shared
//! [`Dispatcher`](crate::dispatch::Dispatcher) with its service accessor:
//! it validates nothing locally, calls the endpoint, emits a success toast
//! after a successful mutation and returns the response body. Failures go
//! back to the caller after the dispatcher has reported them.

mod auth;
mod dashboard;
mod email_configuration;
mod email_template;
mod integration;
mod menu;
mod plan;

pub use auth::AuthStore;
pub use dashboard::DashboardStore;
pub use email_configuration::EmailConfigurationStore;
pub use email_template::EmailTemplateStore;
pub use integration::IntegrationStore;
pub use menu::MenuStore;
pub use plan::PlanStore;
