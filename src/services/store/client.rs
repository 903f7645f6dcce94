//! Table store interface used by the repos (notifications, activities, profiles).
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Result type for table store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Table-store errors (transport/status/body).
///
/// Note:
/// - Kept independent from `AppError`; the API layer maps every variant to an
///   upstream error and forwards `detail()` to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table store request failed: {0}")]
    Transport(String),
    #[error("table store request timed out")]
    Timeout,
    #[error("table store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("table store returned an unreadable body: {0}")]
    InvalidBody(String),
}

impl StoreError {
    /// Caller-facing text.
    ///
    /// Only a rejection carries the store's own message; the other variants wrap
    /// transport errors that name the upstream URL, so they stay in the logs.
    pub fn detail(&self) -> String {
        match self {
            StoreError::Rejected { message, .. } => message.clone(),
            StoreError::Timeout => "table store request timed out".to_string(),
            StoreError::Transport(_) => "table store unavailable".to_string(),
            StoreError::InvalidBody(_) => "table store returned an unreadable response".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

/// Filtered select: equality filters, optional ordering and row limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filters: Vec<(String, String)>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(Order {
            column: column.into(),
            descending: true,
        });
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }
}

/// A minimal table store interface.
///
/// Rows travel as JSON objects; typed mapping happens in the repos.
/// Implementations are shared behind `Arc<dyn TableStore>` in `AppState`.
#[async_trait]
pub trait TableStore: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Insert one row and return the stored representation.
    async fn insert(&self, table: &str, row: Value) -> StoreResult<Vec<Value>>;

    // Select rows matching `query`.
    async fn select(&self, table: &str, query: &Query) -> StoreResult<Vec<Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_builder_accumulates() {
        let q = Query::new()
            .eq("destination_user", "u-1")
            .order_desc("created_at")
            .limit(1);

        assert_eq!(
            q.filters,
            vec![("destination_user".to_string(), "u-1".to_string())]
        );
        assert_eq!(
            q.order,
            Some(Order {
                column: "created_at".into(),
                descending: true
            })
        );
        assert_eq!(q.limit, Some(1));
    }

    #[test]
    fn detail_prefers_store_message() {
        let rejected = StoreError::Rejected {
            status: 400,
            message: "column \"foo\" does not exist".into(),
        };
        assert_eq!(rejected.detail(), "column \"foo\" does not exist");
        assert_eq!(
            StoreError::Timeout.detail(),
            "table store request timed out"
        );
    }

    #[test]
    fn detail_hides_transport_text() {
        let transport = StoreError::Transport(
            "error sending request for url (https://abc.supabase.co/rest/v1/notifications)".into(),
        );
        assert_eq!(transport.detail(), "table store unavailable");

        let body = StoreError::InvalidBody("error decoding response body at https://abc.supabase.co".into());
        assert!(!body.detail().contains("supabase.co"));
    }
}
