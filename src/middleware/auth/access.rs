//! Bearer token 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <token>` を取り出し、identity provider に問い合わせる
//! - ヘッダ無し / 空 token はネットワーク呼び出し前に 401
//! - 検証失敗の理由 (無効 token / provider 到達不可 / timeout) はログにだけ残し、レスポンスは同一の 401

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 認証が必要な routes に access middleware を適用する。
///
/// `route_layer` なので、存在しないパスは 401 ではなく 404 のまま。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

/// `Authorization` から bearer token を取り出す。
///
/// scheme は大文字小文字を区別しない。token が空なら `None`。
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or_else(AppError::missing_token)?;

    let user = match state.identity.verify(token).await {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(AppError::invalid_token());
        }
    };

    tracing::debug!(user_id = %user.id, email = ?user.email, "access token verified");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::from(user));

    Ok(next.run(req).await)
}
