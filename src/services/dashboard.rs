use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::http::ApiClient;

/// Dashboard API client.
#[derive(Debug)]
pub struct DashboardApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl DashboardApi<'_> {
    /// Headline figures for the dashboard.
    pub async fn summary(&self) -> Result<Value> {
        let builder = self.client.request(Method::GET, "dashboard/summary")?;
        self.client.send_json(builder).await
    }
}
