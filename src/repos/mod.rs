/*
 * Responsibility
 * - テーブルごとの insert/select
 * - 書き込む列 (origin_user, read など) はここで固定し、返ってきた行は store の形のまま返す
 */
pub mod activity_repo;
pub mod error;
pub mod notification_repo;
pub mod profile_repo;

/// A row as the table store returned it. Columns and id type belong to the store.
pub type Row = serde_json::Value;
