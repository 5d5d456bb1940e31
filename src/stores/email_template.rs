use std::fmt::Display;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::http::ApiClient;
use crate::types::Query;

/// Transactional email templates.
#[derive(Debug, Clone)]
pub struct EmailTemplateStore {
    client: Arc<ApiClient>,
    dispatcher: Arc<Dispatcher>,
}

impl EmailTemplateStore {
    pub fn new(client: Arc<ApiClient>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { client, dispatcher }
    }

    pub async fn search<B: Serialize + ?Sized>(
        &self,
        payload: &B,
        params: Option<&Query>,
    ) -> Result<Value> {
        self.dispatcher
            .run(
                "email_template.search",
                self.client.email_templates().search(payload, params),
            )
            .await
    }

    pub async fn show(&self, id: impl Display, params: Option<&Query>) -> Result<Value> {
        self.dispatcher
            .run(
                "email_template.show",
                self.client.email_templates().get_item(id, params),
            )
            .await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<Value> {
        self.dispatcher
            .run("email_template.update", async {
                let res = self.client.email_templates().update(id, payload).await?;
                self.dispatcher
                    .show_success("Template updated", "Email template updated successfully");
                Ok(res)
            })
            .await
    }

    /// Rendered template body.
    pub async fn preview<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<String> {
        self.dispatcher
            .run(
                "email_template.preview",
                self.client.email_templates().preview(id, payload),
            )
            .await
    }

    pub async fn change_status<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<Value> {
        self.dispatcher
            .run("email_template.change_status", async {
                let res = self
                    .client
                    .email_templates()
                    .change_status(id, payload)
                    .await?;
                self.dispatcher.show_success(
                    "Template updated",
                    "Email template status updated successfully",
                );
                Ok(res)
            })
            .await
    }
}
