//! Shared fixtures: an in-process stand-in for the Jamf Pro server and a session wired to it

#![allow(dead_code)]

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::routing::post;
use chrono::Utc;
use jamf_cli::auth::{HttpTokenIssuer, ManualClock};
use jamf_cli::config::AppConfig;
use jamf_cli::session::Session;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const CREDENTIALS: &str = r#"{"client_id":"a","client_secret":"b","grant_type":"client_credentials"}"#;

/// A canned response for one GET path
#[derive(Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    /// When set, any other bearer token gets a 401
    pub required_token: Option<String>,
}

impl Route {
    pub fn xml(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "application/xml",
            body: body.to_string(),
            required_token: None,
        }
    }

    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
            required_token: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: String::new(),
            required_token: None,
        }
    }

    pub fn requiring(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }
}

/// One GET observed by the server
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

#[derive(Default)]
pub struct MockState {
    token_responses: Mutex<Vec<(u16, Value)>>,
    token_calls: AtomicUsize,
    token_forms: Mutex<Vec<String>>,
    token_accept: Mutex<Vec<Option<String>>>,
    routes: Mutex<HashMap<String, Route>>,
    seen: Mutex<Vec<SeenRequest>>,
}

pub struct MockJamf {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockJamf {
    /// Start a server whose token endpoint answers with `token_responses` in order, repeating the last one
    pub async fn start(token_responses: Vec<(u16, Value)>) -> Self {
        let state = Arc::new(MockState {
            token_responses: Mutex::new(token_responses),
            ..MockState::default()
        });

        let app = Router::new()
            .route("/api/oauth/token", post(token_handler))
            .fallback(resource_handler)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn route(&self, path: &str, route: Route) -> &Self {
        self.state.routes.lock().unwrap().insert(path.to_string(), route);
        self
    }

    pub fn token_calls(&self) -> usize {
        self.state.token_calls.load(Ordering::SeqCst)
    }

    pub fn token_forms(&self) -> Vec<String> {
        self.state.token_forms.lock().unwrap().clone()
    }

    pub fn token_accept_headers(&self) -> Vec<Option<String>> {
        self.state.token_accept.lock().unwrap().clone()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn seen_for(&self, path: &str) -> Vec<SeenRequest> {
        self.seen().into_iter().filter(|r| r.path == path).collect()
    }
}

pub fn token_ok(token: &str, expires_in: u64) -> (u16, Value) {
    (200, json!({"access_token": token, "token_type": "Bearer", "expires_in": expires_in}))
}

async fn token_handler(State(state): State<Arc<MockState>>, headers: HeaderMap, body: String) -> (StatusCode, String) {
    let idx = state.token_calls.fetch_add(1, Ordering::SeqCst);
    state.token_forms.lock().unwrap().push(body);
    state.token_accept.lock().unwrap().push(header_value(&headers, header::ACCEPT));

    let responses = state.token_responses.lock().unwrap();
    let (status, body) = responses
        .get(idx)
        .or_else(|| responses.last())
        .cloned()
        .unwrap_or((500, json!({})));

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body.to_string(),
    )
}

async fn resource_handler(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let path = uri.path().to_string();
    let authorization = header_value(&headers, header::AUTHORIZATION);
    state.seen.lock().unwrap().push(SeenRequest {
        path: path.clone(),
        authorization: authorization.clone(),
        accept: header_value(&headers, header::ACCEPT),
    });

    let route = state.routes.lock().unwrap().get(&path).cloned();
    match route {
        Some(route) => {
            if let Some(required) = &route.required_token {
                if authorization.as_deref() != Some(format!("Bearer {}", required).as_str()) {
                    return (StatusCode::UNAUTHORIZED, [(header::CONTENT_TYPE, "text/plain")], String::new());
                }
            }
            (
                StatusCode::from_u16(route.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                [(header::CONTENT_TYPE, route.content_type)],
                route.body,
            )
        }
        None => (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "text/plain")], String::new()),
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

/// Temp directory holding the credential, token, session and cache files
pub struct Workspace {
    pub dir: TempDir,
    pub config: AppConfig,
    pub clock: ManualClock,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_credentials(Some(CREDENTIALS))
    }

    pub fn with_credentials(credentials: Option<&str>) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig {
            credentials_path: dir.path().join(".jcinf.json"),
            token_path: dir.path().join(".jamf_token"),
            session_path: dir.path().join(".env"),
            cache_dir: dir.path().join("cache"),
            log_file: dir.path().join("jamf-cli.log"),
            ..AppConfig::default()
        };
        if let Some(credentials) = credentials {
            std::fs::write(&config.credentials_path, credentials).expect("write credentials");
        }

        Self {
            dir,
            config,
            clock: ManualClock::new(Utc::now()),
        }
    }

    pub fn renew_on_unauthorized(mut self) -> Self {
        self.config.renew_on_unauthorized = true;
        self
    }

    /// Session using the real HTTP issuer and this workspace's manual clock
    pub fn session(&self) -> Session {
        let http_client = reqwest::Client::new();
        Session::new(
            &self.config,
            http_client.clone(),
            Arc::new(HttpTokenIssuer::new(http_client)),
            Arc::new(self.clock.clone()),
        )
    }

    pub fn token_file(&self) -> Option<Value> {
        let content = std::fs::read_to_string(&self.config.token_path).ok()?;
        serde_json::from_str(&content).ok()
    }
}
