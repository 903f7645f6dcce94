/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

use crate::services::store::StoreError;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("table store error")]
    Store(#[from] StoreError),
    #[error("row serialization error")]
    Serde(#[from] serde_json::Error),
}
