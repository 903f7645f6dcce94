use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::services::endpoint;
use crate::services::store::client::{Query, StoreError, StoreResult, TableStore};

/// PostgREST-backed table store (`<base>/rest/v1/<table>`).
///
/// Every request carries the privileged service key, both as `apikey` and as bearer.
#[derive(Clone, Debug)]
pub struct PostgrestStore {
    rest_url: Url,
    service_key: String,
    http: Client,
}

/// Error body PostgREST returns on non-2xx.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl PostgrestStore {
    pub fn new(
        base_url: &Url,
        service_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let rest_url =
            endpoint(base_url, "rest/v1/").map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            rest_url,
            service_key: service_key.into(),
            http,
        })
    }

    fn table_url(&self, table: &str) -> StoreResult<Url> {
        self.rest_url
            .join(table)
            .map_err(|e| StoreError::Transport(e.to_string()))
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn read_rows(resp: Response) -> StoreResult<Vec<Value>> {
        let status = resp.status();
        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message: error_message(&raw, status.canonical_reason()),
            });
        }

        resp.json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::InvalidBody(e.to_string()))
    }
}

fn map_send_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout
    } else {
        StoreError::Transport(e.to_string())
    }
}

// Prefer PostgREST's `message` (+ `details`), then the raw body, then the status reason.
fn error_message(raw: &str, reason: Option<&str>) -> String {
    if let Ok(body) = serde_json::from_str::<PostgrestErrorBody>(raw)
        && let Some(message) = body.message
    {
        return match body.details {
            Some(details) if !details.is_empty() => format!("{message}: {details}"),
            _ => message,
        };
    }

    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    reason.unwrap_or("table store error").to_string()
}

fn query_pairs(query: &Query) -> Vec<(String, String)> {
    let mut pairs = vec![("select".to_string(), "*".to_string())];

    for (column, value) in &query.filters {
        pairs.push((column.clone(), format!("eq.{value}")));
    }
    if let Some(order) = &query.order {
        let dir = if order.descending { "desc" } else { "asc" };
        pairs.push(("order".to_string(), format!("{}.{dir}", order.column)));
    }
    if let Some(limit) = query.limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }

    pairs
}

#[async_trait]
impl TableStore for PostgrestStore {
    fn backend_name(&self) -> &'static str {
        "postgrest"
    }

    async fn insert(&self, table: &str, row: Value) -> StoreResult<Vec<Value>> {
        let url = self.table_url(table)?;
        tracing::debug!(%table, "table store insert");

        // return=representation: respond with the inserted rows
        let resp = self
            .authorized(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(map_send_error)?;

        Self::read_rows(resp).await
    }

    async fn select(&self, table: &str, query: &Query) -> StoreResult<Vec<Value>> {
        let url = self.table_url(table)?;
        tracing::debug!(%table, ?query, "table store select");

        let resp = self
            .authorized(self.http.get(url))
            .query(&query_pairs(query))
            .send()
            .await
            .map_err(map_send_error)?;

        Self::read_rows(resp).await
    }
}
