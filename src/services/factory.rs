/// Factory: build the process-wide upstream clients from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{IdentityProvider, RemoteIdentityProvider};
use crate::services::store::{PostgrestStore, TableStore};

pub fn build_identity_provider(config: &Config) -> Result<Arc<dyn IdentityProvider>, AppError> {
    let provider = RemoteIdentityProvider::new(
        &config.auth_base_url,
        config.auth_api_key.clone(),
        config.upstream_timeout,
    )
    .map_err(|err| {
        tracing::error!(error = %err, "failed to build identity provider client");
        AppError::Internal
    })?;

    Ok(Arc::new(provider))
}

pub fn build_table_store(config: &Config) -> Result<Arc<dyn TableStore>, AppError> {
    let store = PostgrestStore::new(
        &config.supabase_url,
        config.supabase_service_key.clone(),
        config.upstream_timeout,
    )
    .map_err(|err| {
        tracing::error!(error = %err, "failed to build table store client");
        AppError::Internal
    })?;

    Ok(Arc::new(store))
}
