use std::fmt::Display;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::http::ApiClient;
use crate::types::Query;

/// Subscription plans.
#[derive(Debug, Clone)]
pub struct PlanStore {
    client: Arc<ApiClient>,
    dispatcher: Arc<Dispatcher>,
}

impl PlanStore {
    pub fn new(client: Arc<ApiClient>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { client, dispatcher }
    }

    pub async fn search<B: Serialize + ?Sized>(
        &self,
        payload: &B,
        params: Option<&Query>,
    ) -> Result<Value> {
        self.dispatcher
            .run("plan.search", self.client.plans().search(payload, params))
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value> {
        self.dispatcher
            .run("plan.create", async {
                let res = self.client.plans().create(payload).await?;
                self.dispatcher
                    .show_success("Plan created", "Plan created successfully");
                Ok(res)
            })
            .await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<Value> {
        self.dispatcher
            .run("plan.update", async {
                let res = self.client.plans().update(id, payload).await?;
                self.dispatcher
                    .show_success("Plan updated", "Plan updated successfully");
                Ok(res)
            })
            .await
    }

    pub async fn show(&self, id: impl Display) -> Result<Value> {
        self.dispatcher
            .run("plan.show", self.client.plans().show(id))
            .await
    }

    pub async fn delete_item(&self, id: impl Display) -> Result<Value> {
        self.dispatcher
            .run("plan.delete", async {
                let res = self.client.plans().delete_item(id).await?;
                self.dispatcher
                    .show_success("Plan deleted", "Plan deleted successfully");
                Ok(res)
            })
            .await
    }

    pub async fn change_status<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        payload: &B,
    ) -> Result<Value> {
        self.dispatcher
            .run("plan.change_status", async {
                let res = self.client.plans().change_status(id, payload).await?;
                self.dispatcher
                    .show_success("Plan updated", "Plan status updated successfully");
                Ok(res)
            })
            .await
    }
}
