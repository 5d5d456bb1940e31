use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::http::ApiClient;

/// Email Configuration API client.
#[derive(Debug)]
pub struct EmailConfigurationApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl EmailConfigurationApi<'_> {
    pub async fn get(&self) -> Result<Value> {
        let builder = self.client.request(Method::GET, "email-configuration")?;
        self.client.send_json(builder).await
    }

    /// Replace the configuration. The backend takes a POST, not a PUT.
    pub async fn update<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value> {
        let builder = self
            .client
            .request(Method::POST, "email-configuration")?
            .json(payload);
        self.client.send_json(builder).await
    }
}
