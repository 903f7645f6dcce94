//! In-memory fakes for the identity provider and the table store.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::time::sleep;
use tower::ServiceExt;

use notification_gateway::app::build_router;
use notification_gateway::config::ActivityLogPolicy;
use notification_gateway::middleware;
use notification_gateway::services::auth::{AuthError, IdentityProvider, VerifiedUser};
use notification_gateway::services::store::{Query, StoreError, StoreResult, TableStore};
use notification_gateway::state::AppState;

pub const TOKEN_A: &str = "token-a";
pub const TOKEN_B: &str = "token-b";
pub const USER_A: &str = "9b2f1c7e-0000-4000-8000-00000000000a";
pub const USER_B: &str = "9b2f1c7e-0000-4000-8000-00000000000b";

/// Maps known tokens to user ids; everything else is rejected.
#[derive(Default)]
pub struct FakeIdentity {
    users: HashMap<String, String>,
    calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn with_default_users() -> Self {
        let mut users = HashMap::new();
        users.insert(TOKEN_A.to_string(), USER_A.to_string());
        users.insert(TOKEN_B.to_string(), USER_B.to_string());
        Self {
            users,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn verify(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .get(token)
            .map(|id| VerifiedUser {
                id: id.clone(),
                email: None,
            })
            .ok_or(AuthError::Rejected(reqwest::StatusCode::UNAUTHORIZED))
    }
}

#[derive(Default)]
struct Tables {
    rows: HashMap<String, Vec<Value>>,
    next_id: i64,
    inserts: HashMap<String, usize>,
    selects: usize,
    failing: HashMap<String, String>,
    hosted_shape: bool,
}

/// Table store kept in memory. Assigns `id` and a strictly increasing `created_at`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
    select_delay: Mutex<Option<std::time::Duration>>,
}

impl MemoryStore {
    /// Rows get UUID ids, zone-less timestamps and an extra `metadata` column.
    pub fn with_hosted_shape() -> Self {
        let store = Self::default();
        store.inner.lock().unwrap().hosted_shape = true;
        store
    }

    pub fn delay_selects(&self, delay: std::time::Duration) {
        *self.select_delay.lock().unwrap() = Some(delay);
    }

    pub fn seed(&self, table: &str, row: Value) {
        let mut inner = self.inner.lock().unwrap();
        inner.rows.entry(table.to_string()).or_default().push(row);
    }

    /// Make every insert into `table` fail with `message`.
    pub fn fail_inserts_into(&self, table: &str, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.failing.insert(table.to_string(), message.to_string());
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        let inner = self.inner.lock().unwrap();
        inner.rows.get(table).cloned().unwrap_or_default()
    }

    pub fn insert_count(&self, table: &str) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.inserts.get(table).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.inserts.values().sum::<usize>() + inner.selects
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, table: &str, row: Value) -> StoreResult<Vec<Value>> {
        let mut inner = self.inner.lock().unwrap();
        *inner.inserts.entry(table.to_string()).or_default() += 1;

        if let Some(message) = inner.failing.get(table) {
            return Err(StoreError::Rejected {
                status: 500,
                message: message.clone(),
            });
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(id);

        let mut stored = row;
        if let Value::Object(map) = &mut stored {
            if inner.hosted_shape {
                map.insert("id".into(), json!(format!("3f2c1d9e-0000-4000-8000-{id:012x}")));
                map.insert(
                    "created_at".into(),
                    json!(created_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
                );
                map.insert("metadata".into(), json!({"source": "test"}));
            } else {
                map.insert("id".into(), json!(id));
                map.insert("created_at".into(), json!(created_at.to_rfc3339()));
            }
        }

        inner
            .rows
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());

        Ok(vec![stored])
    }

    async fn select(&self, table: &str, query: &Query) -> StoreResult<Vec<Value>> {
        let delay = *self.select_delay.lock().unwrap();
        if let Some(delay) = delay {
            sleep(delay).await;
        }

        let mut inner = self.inner.lock().unwrap();
        inner.selects += 1;

        let mut rows: Vec<Value> = inner
            .rows
            .get(table)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|(column, value)| row.get(column).map(as_text).as_deref() == Some(value.as_str()))
            })
            .collect();

        if let Some(order) = &query.order {
            rows.sort_by_key(|row| row.get(&order.column).map(as_text).unwrap_or_default());
            if order.descending {
                rows.reverse();
            }
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }
}

pub struct TestApp {
    pub router: Router,
    pub identity: Arc<FakeIdentity>,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(ActivityLogPolicy::BestEffort)
    }

    pub fn with_policy(policy: ActivityLogPolicy) -> Self {
        Self::with_store(Arc::new(MemoryStore::default()), policy)
    }

    pub fn with_store(store: Arc<MemoryStore>, policy: ActivityLogPolicy) -> Self {
        let identity = Arc::new(FakeIdentity::with_default_users());
        let state = AppState::new(identity.clone(), store.clone(), policy);

        Self {
            router: build_router(state),
            identity,
            store,
        }
    }

    /// Routes backed by an arbitrary store; `self.store` stays empty and unused.
    pub fn with_table_store(store: Arc<dyn TableStore>) -> Self {
        let identity = Arc::new(FakeIdentity::with_default_users());
        let state = AppState::new(identity.clone(), store, ActivityLogPolicy::BestEffort);

        Self {
            router: build_router(state),
            identity,
            store: Arc::new(MemoryStore::default()),
        }
    }

    /// Wrap the routes with the transport layers used in production.
    pub fn with_http_layers(mut self, request_timeout: std::time::Duration) -> Self {
        self.router = middleware::http::apply(self.router, request_timeout);
        self
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
