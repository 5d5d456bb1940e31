use std::fmt::Display;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::http::ApiClient;
use crate::types::Query;

/// Relations loaded with a single plan.
const SHOW_INCLUDES: &str = "planMenuLimits,planPricings";

/// Plans API client.
#[derive(Debug)]
pub struct PlansApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl PlansApi<'_> {
    /// Search plans. Filtering and pagination happen on the backend.
    pub async fn search<B: Serialize + ?Sized>(
        &self,
        payload: &B,
        params: Option<&Query>,
    ) -> Result<Value> {
        let mut builder = self
            .client
            .request(Method::POST, "admin/plans/search")?
            .json(payload);
        if let Some(params) = params {
            builder = builder.query(params);
        }
        self.client.send_json(builder).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value> {
        let builder = self
            .client
            .request(Method::POST, "admin/plans")?
            .json(payload);
        self.client.send_json(builder).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<Value> {
        let builder = self
            .client
            .request(Method::PUT, &format!("admin/plans/{id}"))?
            .json(payload);
        self.client.send_json(builder).await
    }

    /// Fetch one plan with its menu limits and pricings.
    pub async fn show(&self, id: impl Display) -> Result<Value> {
        let builder = self
            .client
            .request(Method::GET, &format!("admin/plans/{id}"))?
            .query(&[("include", SHOW_INCLUDES)]);
        self.client.send_json(builder).await
    }

    pub async fn change_status<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<Value> {
        let builder = self
            .client
            .request(Method::POST, &format!("admin/plans/{id}/change-status"))?
            .json(payload);
        self.client.send_json(builder).await
    }

    pub async fn delete_item(&self, id: impl Display) -> Result<Value> {
        let builder = self
            .client
            .request(Method::DELETE, &format!("admin/plans/{id}"))?;
        self.client.send_json(builder).await
    }
}
