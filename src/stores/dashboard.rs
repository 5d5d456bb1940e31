use std::sync::Arc;

use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::http::ApiClient;

#[derive(Debug, Clone)]
pub struct DashboardStore {
    client: Arc<ApiClient>,
    dispatcher: Arc<Dispatcher>,
}

impl DashboardStore {
    pub fn new(client: Arc<ApiClient>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { client, dispatcher }
    }

    pub async fn summary(&self) -> Result<Value> {
        self.dispatcher
            .run("dashboard.summary", self.client.dashboard().summary())
            .await
    }
}
