//! HTTP client adapter for the REST backend.

use reqwest::{Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::session::CookieJar;

/// Accept header for endpoints rendering HTML or plain text.
const TEXT_ACCEPT: &str = "text/html, text/plain, */*";

/// HTTP client for the API.
///
/// Every request goes to `{base_url}/api/{path}` and carries
/// `Authorization: Bearer <access_token>` whenever the attached
/// [`CookieJar`] holds a credential.
///
/// # Example
///
/// ```rust,no_run
/// use tmb_admin::http::ApiClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new("http://localhost:8000")?;
///
/// let summary = client.dashboard().summary().await?;
/// let plans = client.plans().search(&serde_json::json!({}), None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    api_root: Url,
    http: reqwest::Client,
    cookies: Option<CookieJar>,
}

impl ApiClient {
    /// Create an anonymous client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The backend origin (e.g., "https://admin.example.com")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        Ok(Self {
            api_root: api_root(base_url.as_ref())?,
            http,
            cookies: None,
        })
    }

    /// Attach the cookie jar used to authenticate requests.
    #[must_use]
    pub fn with_cookies(mut self, cookies: CookieJar) -> Self {
        self.cookies = Some(cookies);
        self
    }

    /// The `/api/` root every path is resolved against.
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        Ok(self.api_root.join(path.trim_start_matches('/'))?)
    }

    /// Start a request with the JSON accept header and bearer token applied.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        self.request_accepting(method, path, "application/json")
    }

    /// Start a request for an endpoint that answers with rendered text.
    pub(crate) fn request_text(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        self.request_accepting(method, path, TEXT_ACCEPT)
    }

    fn request_accepting(
        &self,
        method: Method,
        path: &str,
        accept: &'static str,
    ) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!(name: "http.request", method = %method, url = %url, "Sending request");
        let mut builder = self.http.request(method, url).header(header::ACCEPT, accept);
        if let Some(token) = self.cookies.as_ref().and_then(CookieJar::access_token) {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send and decode a JSON body. An empty 2xx body decodes as `null`.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = Self::check(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send and return the raw text body.
    pub(crate) async fn send_text(&self, builder: RequestBuilder) -> Result<String> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.text().await?)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        tracing::debug!(name: "http.response", status = status.as_u16(), url = %response.url(), "Received response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message: error_message(&body, status),
        })
    }
}

fn api_root(base_url: &str) -> Result<Url> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?.join("api/")?)
}

/// Prefer the backend's `message` field, then the raw body, then the reason phrase.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}
