/*
 * Responsibility
 * - 外部サービスのクライアント (identity provider / table store)
 * - AppState には trait object として注入する
 */
pub mod auth;
pub mod factory;
pub mod store;

pub use factory::{build_identity_provider, build_table_store};

use url::Url;

/// Resolve `path` under `base`, treating `base` as a directory.
///
/// `Url::join` replaces the last segment when the base has no trailing slash,
/// which would drop a project prefix like `/project`.
pub fn endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let with_slash = format!("{}/", dir.path());
        dir.set_path(&with_slash);
    }
    dir.join(path)
}
