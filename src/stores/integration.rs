use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::http::ApiClient;

/// QuickBooks Online integration.
#[derive(Debug, Clone)]
pub struct IntegrationStore {
    client: Arc<ApiClient>,
    dispatcher: Arc<Dispatcher>,
}

impl IntegrationStore {
    pub fn new(client: Arc<ApiClient>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { client, dispatcher }
    }

    pub async fn quickbooks_info(&self) -> Result<Value> {
        self.dispatcher
            .run("quickbooks.info", self.client.quickbooks().info())
            .await
    }

    pub async fn setup_quickbooks(&self) -> Result<Value> {
        self.dispatcher
            .run("quickbooks.setup", self.client.quickbooks().setup())
            .await
    }

    pub async fn disconnect_quickbooks(&self) -> Result<Value> {
        self.dispatcher
            .run("quickbooks.disconnect", self.client.quickbooks().disconnect())
            .await
    }

    pub async fn toggle_quickbooks<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value> {
        self.dispatcher
            .run("quickbooks.toggle", self.client.quickbooks().toggle(payload))
            .await
    }

    pub async fn save_integration_defaults<B: Serialize + ?Sized>(
        &self,
        payload: &B,
    ) -> Result<Value> {
        self.dispatcher
            .run("quickbooks.save_defaults", async {
                let res = self.client.quickbooks().save_defaults(payload).await?;
                self.dispatcher.show_success(
                    "QuickBooks defaults saved",
                    "QuickBooks defaults saved successfully",
                );
                Ok(res)
            })
            .await
    }

    pub async fn deposit_banks(&self) -> Result<Value> {
        self.dispatcher
            .run("quickbooks.deposit_banks", self.client.quickbooks().deposit_banks())
            .await
    }

    pub async fn expense_bank_accounts(&self) -> Result<Value> {
        self.dispatcher
            .run(
                "quickbooks.expense_bank_accounts",
                self.client.quickbooks().expense_bank_accounts(),
            )
            .await
    }

    pub async fn credit_card_accounts(&self) -> Result<Value> {
        self.dispatcher
            .run(
                "quickbooks.credit_card_accounts",
                self.client.quickbooks().credit_card_accounts(),
            )
            .await
    }
}
