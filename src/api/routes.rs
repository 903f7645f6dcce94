/*
 * Responsibility
 * - URL 構造を定義
 * - /health は認証なし、それ以外は Bearer 必須 (route_layer で access middleware を適用)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::handlers::{
    activities::create_activity,
    health::health,
    notifications::{create_notification, list_notifications},
    profiles::get_my_profile,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/notifications",
            get(list_notifications).post(create_notification),
        )
        .route("/activities", post(create_activity))
        .route("/profiles/me", get(get_my_profile));

    let protected = middleware::auth::access::apply(protected, state);

    Router::new().route("/health", get(health)).merge(protected)
}
