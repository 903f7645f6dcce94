/*
 * Responsibility
 * - GET /profiles/me: 自分の role を返す
 * - profile が無いのはエラーではない ({role: null})
 */
use axum::{Json, extract::State};

use crate::{
    api::{dto::profiles::RoleResponse, extractors::AuthCtxExtractor},
    error::AppError,
    repos::profile_repo,
    state::AppState,
};

pub async fn get_my_profile(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<RoleResponse>, AppError> {
    let role = profile_repo::role_of(state.store.as_ref(), &auth.user_id)
        .await
        .map_err(|e| {
            tracing::warn!(error = ?e, "profile_repo::role_of failed");
            AppError::from(e)
        })?;

    Ok(Json(RoleResponse { role }))
}
