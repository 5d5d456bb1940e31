use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::http::ApiClient;

/// Outgoing mail settings. Keeps the last fetched configuration.
#[derive(Debug)]
pub struct EmailConfigurationStore {
    client: Arc<ApiClient>,
    dispatcher: Arc<Dispatcher>,
    current_config: RwLock<Option<Value>>,
}

impl EmailConfigurationStore {
    pub fn new(client: Arc<ApiClient>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            client,
            dispatcher,
            current_config: RwLock::new(None),
        }
    }

    /// Fetch the configuration and cache its `data` record.
    pub async fn get_configuration(&self) -> Result<Value> {
        self.dispatcher
            .run("email_configuration.get", async {
                let res = self.client.email_configuration().get().await?;
                *self
                    .current_config
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = res.get("data").cloned();
                Ok(res)
            })
            .await
    }

    /// Save the configuration. The cache is left alone until the next fetch.
    pub async fn update_configuration<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value> {
        self.dispatcher
            .run("email_configuration.update", async {
                let res = self.client.email_configuration().update(payload).await?;
                self.dispatcher.show_success(
                    "Configuration updated",
                    "Email configuration updated successfully",
                );
                Ok(res)
            })
            .await
    }

    pub fn current_config(&self) -> Option<Value> {
        self.current_config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
