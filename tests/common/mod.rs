//! In-process mock of the REST backend plus a client wired against it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use tmb_admin::AppState;
use tmb_admin::config::{ApiConfig, AppConfig, SessionConfig};
use tmb_admin::dispatch::MemoryNotifier;
use tmb_admin::storage::MemoryStore;

/// A request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    /// Every `Accept` header value, in order.
    pub accept: Vec<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

/// Canned responses keyed by `"METHOD /path"`. Unknown routes answer 404.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.insert(method, path, status, "application/json", body.to_string())
    }

    pub fn on_text(&self, method: &str, path: &str, body: &str) -> &Self {
        self.insert(method, path, 200, "text/html; charset=utf-8", body.to_string())
    }

    fn insert(
        &self,
        method: &str,
        path: &str,
        status: u16,
        content_type: &'static str,
        body: String,
    ) -> &Self {
        let canned = Canned {
            status: StatusCode::from_u16(status).unwrap(),
            content_type,
            body,
        };
        self.routes
            .lock()
            .unwrap()
            .insert(format!("{method} {path}"), canned);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request to `METHOD /path`.
    pub fn last(&self, method: &str, path: &str) -> Option<Recorded> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
    }

    /// Bind to an ephemeral port and return the base URL.
    pub async fn serve(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

async fn handle(
    State(mock): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        accept: headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect(),
        body,
    };
    let key = format!("{} {}", recorded.method, recorded.path);
    mock.requests.lock().unwrap().push(recorded);

    match mock.routes.lock().unwrap().get(&key).cloned() {
        Some(canned) => (
            canned.status,
            [(header::CONTENT_TYPE, canned.content_type)],
            canned.body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            json!({ "message": "Not found" }).to_string(),
        )
            .into_response(),
    }
}

/// A fully wired client with in-memory stores.
pub struct Harness {
    pub app: AppState,
    pub notifier: MemoryNotifier,
    pub credentials: MemoryStore,
    pub storage: MemoryStore,
}

pub fn harness(base_url: &str) -> Harness {
    let config = AppConfig {
        api: ApiConfig {
            base_url: base_url.to_string(),
        },
        session: SessionConfig {
            cookie_name: "tmb_cookie".to_string(),
            cookie_ttl_days: 7,
            storage_dir: ".tmb".to_string(),
        },
    };
    let notifier = MemoryNotifier::new();
    let credentials = MemoryStore::new();
    let storage = MemoryStore::new();
    let app = AppState::new(
        config,
        Arc::new(credentials.clone()),
        Arc::new(storage.clone()),
        Arc::new(notifier.clone()),
    )
    .expect("client should build");
    Harness {
        app,
        notifier,
        credentials,
        storage,
    }
}

/// A token body as the auth endpoints return it.
pub fn token_body(access_token: &str, expires_in: i64) -> Value {
    json!({
        "message": "Logged in",
        "data": {
            "access_token": access_token,
            "expires_in": expires_in,
            "refresh_token": "refresh-1",
        }
    })
}
