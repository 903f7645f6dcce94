/*
 * Responsibility
 * - profiles テーブルから自分の role を取得する (読み取りのみ)
 */
use serde_json::Value;

use crate::repos::{Row, error::RepoError};
use crate::services::store::{Query, TableStore};

pub const TABLE: &str = "profiles";

pub async fn find_by_user(store: &dyn TableStore, user_id: &str) -> Result<Option<Row>, RepoError> {
    let query = Query::new().eq("user_id", user_id).limit(1);

    let rows = store.select(TABLE, &query).await?;
    Ok(rows.into_iter().next())
}

/// `role` column of the caller's profile, as stored.
///
/// - no profile row         -> `Null`
/// - row without `role`     -> `Null`
pub async fn role_of(store: &dyn TableStore, user_id: &str) -> Result<Value, RepoError> {
    Ok(find_by_user(store, user_id)
        .await?
        .and_then(|mut profile| profile.get_mut("role").map(Value::take))
        .unwrap_or(Value::Null))
}
