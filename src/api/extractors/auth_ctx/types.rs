/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が identity provider で検証して request extensions に格納し、handler はこの型だけを受け取る
 */
use crate::services::auth::VerifiedUser;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は identity provider が返した id。書き込みの origin / acting user は常にこれを使う
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: String,
}

impl From<VerifiedUser> for AuthCtx {
    fn from(user: VerifiedUser) -> Self {
        Self { user_id: user.id }
    }
}
