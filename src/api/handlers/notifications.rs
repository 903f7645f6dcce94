/*
 * Responsibility
 * - POST /notifications: 通知を作成し、activity log に記録する
 * - GET /notifications: 自分宛ての通知を新しい順に返す
 * - origin_user は常に AuthCtx から取る (body からは受け取らない)
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::{
            CreatedResponse,
            notifications::{CreateNotificationRequest, NotificationListResponse},
        },
        extractors::{ApiJson, AuthCtxExtractor},
    },
    config::ActivityLogPolicy,
    error::AppError,
    repos::{Row, activity_repo, notification_repo},
    state::AppState,
};

pub async fn create_notification(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiJson(req): ApiJson<CreateNotificationRequest>,
) -> Result<Json<CreatedResponse<Row>>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let rows = notification_repo::create(
        state.store.as_ref(),
        &req.destination_user,
        &auth.user_id,
        &req.message,
    )
    .await
    .map_err(|e| {
        tracing::warn!(error = ?e, "notification_repo::create failed");
        AppError::from(e)
    })?;

    tracing::info!(
        origin_user = %auth.user_id,
        destination_user = %req.destination_user,
        "notification created"
    );

    // secondary write; outcome depends on the configured policy
    if let Err(e) = activity_repo::create(
        state.store.as_ref(),
        &auth.user_id,
        activity_repo::CREATED_NOTIFICATION,
        Some(&req.message),
    )
    .await
    {
        match state.activity_log {
            ActivityLogPolicy::BestEffort => {
                tracing::warn!(error = ?e, user_id = %auth.user_id, "activity log write failed, ignored");
            }
            ActivityLogPolicy::FailRequest => {
                tracing::error!(error = ?e, user_id = %auth.user_id, "activity log write failed");
                return Err(e.into());
            }
        }
    }

    Ok(Json(CreatedResponse::new(rows)))
}

pub async fn list_notifications(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<NotificationListResponse>, AppError> {
    let notifications =
        notification_repo::list_for_destination(state.store.as_ref(), &auth.user_id)
            .await
            .map_err(|e| {
                tracing::warn!(error = ?e, "notification_repo::list_for_destination failed");
                AppError::from(e)
            })?;

    Ok(Json(NotificationListResponse { notifications }))
}
