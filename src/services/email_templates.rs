use std::fmt::Display;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::http::ApiClient;
use crate::types::Query;

/// Email Templates API client.
#[derive(Debug)]
pub struct EmailTemplatesApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl EmailTemplatesApi<'_> {
    pub async fn search<B: Serialize + ?Sized>(
        &self,
        payload: &B,
        params: Option<&Query>,
    ) -> Result<Value> {
        let mut builder = self
            .client
            .request(Method::POST, "email-templates/search")?
            .json(payload);
        if let Some(params) = params {
            builder = builder.query(params);
        }
        self.client.send_json(builder).await
    }

    pub async fn get_item(&self, id: impl Display, params: Option<&Query>) -> Result<Value> {
        let mut builder = self
            .client
            .request(Method::GET, &format!("email-templates/{id}"))?;
        if let Some(params) = params {
            builder = builder.query(params);
        }
        self.client.send_json(builder).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<Value> {
        let builder = self
            .client
            .request(Method::PUT, &format!("email-templates/{id}"))?
            .json(payload);
        self.client.send_json(builder).await
    }

    /// Render a template. The backend answers with the rendered text, not JSON.
    pub async fn preview<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<String> {
        let builder = self
            .client
            .request_text(Method::POST, &format!("email-templates/{id}/preview"))?
            .json(payload);
        self.client.send_text(builder).await
    }

    pub async fn change_status<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<Value> {
        let builder = self
            .client
            .request(Method::POST, &format!("email-templates/{id}/change-status"))?
            .json(payload);
        self.client.send_json(builder).await
    }
}
