/*
 * Responsibility
 * - notifications テーブル向け操作 (insert / 宛先ユーザーでの一覧)
 * - read は作成時に常に false、origin_user は呼び出し側が検証済み id を渡す
 */
use serde::Serialize;

use crate::repos::{Row, error::RepoError};
use crate::services::store::{Query, TableStore};

pub const TABLE: &str = "notifications";

#[derive(Debug, Serialize)]
struct NewNotification<'a> {
    destination_user: &'a str,
    origin_user: &'a str,
    message: &'a str,
    read: bool,
}

pub async fn create(
    store: &dyn TableStore,
    destination_user: &str,
    origin_user: &str,
    message: &str,
) -> Result<Vec<Row>, RepoError> {
    let row = serde_json::to_value(NewNotification {
        destination_user,
        origin_user,
        message,
        read: false,
    })?;

    Ok(store.insert(TABLE, row).await?)
}

pub async fn list_for_destination(
    store: &dyn TableStore,
    destination_user: &str,
) -> Result<Vec<Row>, RepoError> {
    let query = Query::new()
        .eq("destination_user", destination_user)
        .order_desc("created_at");

    Ok(store.select(TABLE, &query).await?)
}
