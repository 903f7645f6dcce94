/*
 * Responsibility
 * - POST /activities: 認証済みユーザーとして activity を記録する
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::{CreatedResponse, activities::CreateActivityRequest},
        extractors::{ApiJson, AuthCtxExtractor},
    },
    error::AppError,
    repos::{Row, activity_repo},
    state::AppState,
};

pub async fn create_activity(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiJson(req): ApiJson<CreateActivityRequest>,
) -> Result<Json<CreatedResponse<Row>>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let rows = activity_repo::create(
        state.store.as_ref(),
        &auth.user_id,
        &req.action,
        req.detail.as_deref(),
    )
    .await
    .map_err(|e| {
        tracing::warn!(error = ?e, "activity_repo::create failed");
        AppError::from(e)
    })?;

    Ok(Json(CreatedResponse::new(rows)))
}
