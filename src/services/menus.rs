use std::fmt::Display;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::http::ApiClient;
use crate::types::Query;

/// Menus API client.
#[derive(Debug)]
pub struct MenusApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl MenusApi<'_> {
    pub async fn search<B: Serialize + ?Sized>(
        &self,
        payload: &B,
        params: Option<&Query>,
    ) -> Result<Value> {
        let mut builder = self
            .client
            .request(Method::POST, "admin/menus/search")?
            .json(payload);
        if let Some(params) = params {
            builder = builder.query(params);
        }
        self.client.send_json(builder).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value> {
        let builder = self
            .client
            .request(Method::POST, "admin/menus")?
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
            .request(Method::PUT, &format!("admin/menus/{id}"))?
            .json(payload);
        self.client.send_json(builder).await
    }

    pub async fn change_status<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<Value> {
        let builder = self
            .client
            .request(Method::POST, &format!("admin/menus/{id}/change-status"))?
            .json(payload);
        self.client.send_json(builder).await
    }
}
