//! Test doubles shared by the cache, counter, and session tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use serde_json::json;
use tokio::sync::Notify;

use crate::config::ResolvedConfig;
use crate::labels::{LabelOverrides, Locale};
use crate::models::{Notification, NotificationId};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{Error, Result};

pub const TEST_API_URL: &str = "https://api.test";

pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        api_url: TEST_API_URL.to_string(),
        publishable_key: "pk_test_123".to_string(),
        subscriber_id: "user-1".to_string(),
        polling_interval_ms: 0,
        locale: Locale::En,
        page_size: 20,
        origin: None,
        labels: LabelOverrides::default(),
    }
}

pub fn notification(id: &str) -> Notification {
    Notification {
        id: NotificationId::new(id),
        tenant_id: "tenant-1".to_string(),
        subscriber_id: "user-1".to_string(),
        title: format!("Notification {id}"),
        body: None,
        action_url: None,
        metadata: serde_json::Map::new(),
        read_at: None,
        inserted_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub fn read_notification(id: &str) -> Notification {
    Notification {
        read_at: Some(fixed_time()),
        ..notification(id)
    }
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// `{ "data": [...] }` body with ids `{prefix}{start}..{prefix}{end}`.
pub fn page_body(prefix: &str, range: std::ops::Range<usize>) -> serde_json::Value {
    let items = range
        .map(|index| notification(&format!("{prefix}{index}")))
        .collect::<Vec<_>>();
    json!({ "data": items })
}

pub fn page_of(items: &[Notification]) -> serde_json::Value {
    json!({ "data": items })
}

#[derive(Clone)]
pub enum Reply {
    Json(StatusCode, serde_json::Value),
    Text(StatusCode, String),
    NetworkFailure,
    /// Wait for the gate before producing the inner reply.
    Gated(Arc<Notify>, Box<Reply>),
}

impl Reply {
    pub fn ok(body: serde_json::Value) -> Self {
        Self::Json(StatusCode::OK, body)
    }

    pub fn status(status: u16) -> Self {
        Self::Text(
            StatusCode::from_u16(status).expect("valid status"),
            format!("status {status}"),
        )
    }

    pub fn gated(self, gate: &Arc<Notify>) -> Self {
        Self::Gated(gate.clone(), Box::new(self))
    }
}

/// Scripted `Transport`: replies are queued per `METHOD path` key, the last
/// queued reply repeats, and every request is recorded.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .entry(route_key(&method, path))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Number of recorded requests whose path (without query) equals `path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| {
                request.method == method
                    && strip_query(relative_path(&request.url)) == strip_query(path)
            })
            .count()
    }

    /// Yield until a request for exactly `path` (query included) has been
    /// recorded.
    pub async fn wait_for(&self, method: Method, path: &str) {
        for _ in 0..1_000 {
            if self.sent(&method, path) {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("request {method} {path} was never sent");
    }

    fn sent(&self, method: &Method, path: &str) -> bool {
        self.requests
            .lock()
            .iter()
            .any(|request| request.method == *method && relative_path(&request.url) == path)
    }

    fn next_reply(&self, key: &str) -> Option<Reply> {
        let mut routes = self.routes.lock();
        let queue = routes.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let key = route_key(&request.method, relative_path(&request.url));
        self.requests.lock().push(request);

        let mut reply = self
            .next_reply(&key)
            .unwrap_or_else(|| Reply::Text(StatusCode::NOT_FOUND, format!("no route for {key}")));
        loop {
            match reply {
                Reply::Gated(gate, inner) => {
                    gate.notified().await;
                    reply = *inner;
                }
                Reply::Json(status, body) => return Ok(HttpResponse::new(status, body.to_string())),
                Reply::Text(status, body) => return Ok(HttpResponse::new(status, body)),
                Reply::NetworkFailure => {
                    return Err(Error::network(std::io::Error::new(
                        std::io::ErrorKind::ConnectionRefused,
                        "connection refused",
                    )))
                }
            }
        }
    }
}

fn route_key(method: &Method, path: &str) -> String {
    format!("{method} {path}")
}

fn relative_path(url: &str) -> &str {
    url.strip_prefix(TEST_API_URL).unwrap_or(url)
}

fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(path, _)| path)
}
