use std::fmt::Display;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::http::ApiClient;
use crate::types::Query;

/// Menus (feature entries that plans grant limits on).
#[derive(Debug, Clone)]
pub struct MenuStore {
    client: Arc<ApiClient>,
    dispatcher: Arc<Dispatcher>,
}

impl MenuStore {
    pub fn new(client: Arc<ApiClient>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { client, dispatcher }
    }

    pub async fn search<B: Serialize + ?Sized>(
        &self,
        payload: &B,
        params: Option<&Query>,
    ) -> Result<Value> {
        self.dispatcher
            .run("menu.search", self.client.menus().search(payload, params))
            .await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value> {
        self.dispatcher
            .run("menu.create", async {
                let res = self.client.menus().create(payload).await?;
                self.dispatcher
                    .show_success("Menu created", "Menu created successfully");
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
            .run("menu.update", async {
                let res = self.client.menus().update(id, payload).await?;
                self.dispatcher
                    .show_success("Menu updated", "Menu updated successfully");
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
            .run("menu.change_status", async {
                let res = self.client.menus().change_status(id, payload).await?;
                self.dispatcher
                    .show_success("Menu updated", "Menu updated successfully");
                Ok(res)
            })
            .await
    }
}
