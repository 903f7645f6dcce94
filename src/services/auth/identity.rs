use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::services::endpoint;

// Errors returned by bearer-token verification.
//
// The middleware collapses all of these into a single 401; the variant is only
// used for server-side logging.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("empty bearer token")]
    EmptyToken,
    #[error("identity provider rejected token ({0})")]
    Rejected(StatusCode),
    #[error("identity provider response has no 'id'")]
    MissingId,
    #[error("identity provider returned an unreadable body: {0}")]
    InvalidBody(String),
    #[error("identity provider request failed: {0}")]
    Transport(String),
    #[error("identity provider request timed out")]
    Timeout,
}

/// Identity resolved from a bearer token.
///
/// `id` is the only field handlers rely on; `email` is kept for log correlation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    pub id: String,
    pub email: Option<String>,
}

/// Exchanges a bearer token for a verified identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    async fn verify(&self, token: &str) -> Result<VerifiedUser, AuthError>;
}

/// `GET <base>/auth/v1/user` のレスポンス (必要なフィールドのみ)
#[derive(Debug, Deserialize)]
struct CurrentUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Identity provider backed by the hosted auth service's "current user" endpoint.
#[derive(Clone, Debug)]
pub struct RemoteIdentityProvider {
    user_url: Url,
    api_key: String,
    http: Client,
}

impl RemoteIdentityProvider {
    pub fn new(
        base_url: &Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let user_url =
            endpoint(base_url, "auth/v1/user").map_err(|e| AuthError::Transport(e.to_string()))?;

        Ok(Self {
            user_url,
            api_key: api_key.into(),
            http,
        })
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentityProvider {
    async fn verify(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        let resp = self
            .http
            .get(self.user_url.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuthError::Timeout
                } else {
                    AuthError::Transport(e.to_string())
                }
            })?;

        if resp.status() != StatusCode::OK {
            return Err(AuthError::Rejected(resp.status()));
        }

        let user = resp
            .json::<CurrentUser>()
            .await
            .map_err(|e| AuthError::InvalidBody(e.to_string()))?;

        let id = user
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(AuthError::MissingId)?;

        Ok(VerifiedUser {
            id,
            email: user.email,
        })
    }
}
