use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::http::ApiClient;

/// QuickBooks integration API client.
#[derive(Debug)]
pub struct QuickBooksApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl QuickBooksApi<'_> {
    async fn get(&self, path: &str) -> Result<Value> {
        let builder = self.client.request(Method::GET, path)?;
        self.client.send_json(builder).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, payload: Option<&B>) -> Result<Value> {
        let mut builder = self.client.request(Method::POST, path)?;
        if let Some(payload) = payload {
            builder = builder.json(payload);
        }
        self.client.send_json(builder).await
    }

    /// Connection status and saved defaults.
    pub async fn info(&self) -> Result<Value> {
        self.get("quickbooks/info").await
    }

    /// Begin the OAuth connection; the body carries the authorization URL.
    pub async fn setup(&self) -> Result<Value> {
        self.post::<Value>("quickbooks/setup", None).await
    }

    pub async fn disconnect(&self) -> Result<Value> {
        self.post::<Value>("quickbooks/disconnect", None).await
    }

    pub async fn toggle<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value> {
        self.post("quickbooks/toggle", Some(payload)).await
    }

    pub async fn save_defaults<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value> {
        self.post("quickbooks/save-defaults", Some(payload)).await
    }

    pub async fn deposit_banks(&self) -> Result<Value> {
        self.get("quickbooks/deposit-banks").await
    }

    pub async fn expense_bank_accounts(&self) -> Result<Value> {
        self.get("quickbooks/expense-bank-accounts").await
    }

    pub async fn credit_card_accounts(&self) -> Result<Value> {
        self.get("quickbooks/credit-card-accounts").await
    }
}
