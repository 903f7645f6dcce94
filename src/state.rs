/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - identity: IdentityProvider, store: TableStore, activity_log: ActivityLogPolicy
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::config::ActivityLogPolicy;
use crate::services::{auth::IdentityProvider, store::TableStore};

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn TableStore>,
    pub activity_log: ActivityLogPolicy,
}

impl AppState {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn TableStore>,
        activity_log: ActivityLogPolicy,
    ) -> Self {
        Self {
            identity,
            store,
            activity_log,
        }
    }
}
