/*
 * Responsibility
 * - activities テーブル (activity log) への insert
 */
use serde::Serialize;

use crate::repos::{Row, error::RepoError};
use crate::services::store::TableStore;

pub const TABLE: &str = "activities";

/// Action recorded after a notification is created.
pub const CREATED_NOTIFICATION: &str = "created_notification";

#[derive(Debug, Serialize)]
struct NewActivity<'a> {
    user_id: &'a str,
    action: &'a str,
    detail: Option<&'a str>,
}

pub async fn create(
    store: &dyn TableStore,
    user_id: &str,
    action: &str,
    detail: Option<&str>,
) -> Result<Vec<Row>, RepoError> {
    let row = serde_json::to_value(NewActivity {
        user_id,
        action,
        detail,
    })?;

    Ok(store.insert(TABLE, row).await?)
}
