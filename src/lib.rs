//! TMB Admin client
//!
//! Client-side core of the TMB business administration application: a typed
//! HTTP adapter over the REST backend, per-resource services, the session
//! lifecycle, and the stores that wrap every call in uniform
//! loading/error/success signaling.
//!
//! # Architecture
//!
//! - **HTTP**: [`http::ApiClient`] resolves `{base}/api/...`, attaches the
//!   bearer token and normalizes errors
//! - **Services**: one accessor per resource, 1:1 with backend endpoints
//! - **Session**: auth cookie, current user and intended route
//! - **Dispatch**: loading counter plus error/success notifications
//! - **Stores**: Auth, Plan, Menu, Email Template, Email Configuration,
//!   Integration and Dashboard
//!
//! # Modules
//!
//! - [`config`]: layered settings (defaults, YAML file, `TMB_` env, CLI)
//! - [`storage`]: credential and session-scoped key-value stores
//! - [`routes`]: route table and navigation guard
//! - [`format`]: money and date display helpers

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod http;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;
pub mod stores;
pub mod telemetry;
pub mod types;

pub use error::{Error, Result};

use std::sync::Arc;

use crate::config::AppConfig;
use crate::dispatch::{Dispatcher, Notifier};
use crate::http::ApiClient;
use crate::routes::{AdministrationModule, RouteTable};
use crate::session::{CookieJar, SessionManager};
use crate::storage::{CredentialStore, FileStore, SessionStorage};
use crate::stores::{
    AuthStore, DashboardStore, EmailConfigurationStore, EmailTemplateStore, IntegrationStore,
    MenuStore, PlanStore,
};

/// Every long-lived object of the client, constructed once and injected.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Global Configuration
    pub config: Arc<AppConfig>,
    /// HTTP adapter shared by all stores.
    pub client: Arc<ApiClient>,
    /// Loading/error/success signaling.
    pub dispatcher: Arc<Dispatcher>,
    /// Auth cookie, user and intended route.
    pub session: Arc<SessionManager>,
    /// Shell routes plus feature modules.
    pub routes: Arc<RouteTable>,
    pub auth: AuthStore,
    pub plans: PlanStore,
    pub menus: MenuStore,
    pub email_templates: EmailTemplateStore,
    pub email_configuration: Arc<EmailConfigurationStore>,
    pub integrations: IntegrationStore,
    pub dashboard: DashboardStore,
}

impl AppState {
    /// Wire the client over explicit stores.
    pub fn new(
        config: AppConfig,
        credentials: Arc<dyn CredentialStore>,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let cookies = CookieJar::with_settings(
            credentials,
            config.session.cookie_name.clone(),
            config.session.cookie_ttl(),
        );
        let client = Arc::new(ApiClient::new(&config.api.base_url)?.with_cookies(cookies.clone()));
        let dispatcher = Arc::new(Dispatcher::new(notifier));
        let session = Arc::new(SessionManager::new(Arc::clone(&client), cookies, storage));
        let routes = Arc::new(RouteTable::shell().with_module(&AdministrationModule));

        tracing::debug!(name: "app.initialized", api_root = %client.api_root(), "Client initialized");

        Ok(Self {
            auth: AuthStore::new(
                Arc::clone(&client),
                Arc::clone(&dispatcher),
                Arc::clone(&session),
            ),
            plans: PlanStore::new(Arc::clone(&client), Arc::clone(&dispatcher)),
            menus: MenuStore::new(Arc::clone(&client), Arc::clone(&dispatcher)),
            email_templates: EmailTemplateStore::new(Arc::clone(&client), Arc::clone(&dispatcher)),
            email_configuration: Arc::new(EmailConfigurationStore::new(
                Arc::clone(&client),
                Arc::clone(&dispatcher),
            )),
            integrations: IntegrationStore::new(Arc::clone(&client), Arc::clone(&dispatcher)),
            dashboard: DashboardStore::new(Arc::clone(&client), Arc::clone(&dispatcher)),
            config: Arc::new(config),
            client,
            dispatcher,
            session,
            routes,
        })
    }

    /// Wire the client over the JSON files under `session.storage_dir`.
    pub fn with_file_storage(config: AppConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let credentials = Arc::new(FileStore::new(config.session.credentials_path()));
        let storage = Arc::new(FileStore::new(config.session.session_path()));
        Self::new(config, credentials, storage, notifier)
    }

    /// Drop all local session state.
    pub fn teardown(&self) -> Result<()> {
        self.session.clear_session_state()
    }
}
