/*
 * Responsibility
 * - Config読み込み → 依存生成 (identity provider / table store) → Router 組み立て
 * - Middleware の適用 (auth は routes 側、CORS/security headers/http はここ)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    error::AppError,
    middleware,
    services::{build_identity_provider, build_table_store},
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,notification_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {} (activity log policy: {:?})",
        config.app_env,
        config.addr,
        config.activity_log_policy
    );

    let state = build_state(&config)?;
    tracing::info!(
        store = state.store.backend_name(),
        supabase_url = %config.supabase_url,
        auth_base_url = %config.auth_base_url,
        "upstream clients ready"
    );

    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState, AppError> {
    // Process-level clients are built once here and injected into every handler.
    let identity = build_identity_provider(config)?;
    let store = build_table_store(config)?;

    Ok(AppState::new(identity, store, config.activity_log_policy))
}

/// Routes + auth, without the transport layers. Used directly by the tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state)
}

fn build_app(state: AppState, config: &Config) -> Router {
    let router = build_router(state);
    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config.request_timeout)
}
