/*
 * Responsibility
 * - 環境変数の読み込み (SUPABASE_URL, SERVICE KEY, CORS 許可, timeout など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// What to do when the activity-log write that follows a notification insert fails.
///
/// The table store has no transactions, so `FailRequest` does not undo the
/// notification row; it only reports the failure to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityLogPolicy {
    #[default]
    BestEffort,
    FailRequest,
}

impl ActivityLogPolicy {
    pub fn from_flag(fail_request_on_log_error: bool) -> Self {
        if fail_request_on_log_error {
            Self::FailRequest
        } else {
            Self::BestEffort
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // table store (PostgREST)
    pub supabase_url: Url,
    pub supabase_service_key: String,

    // identity provider (GoTrue); defaults to the same project
    pub auth_base_url: Url,
    pub auth_api_key: String,

    pub upstream_timeout: Duration,
    pub request_timeout: Duration,

    pub activity_log_policy: ActivityLogPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let supabase_url = std::env::var("SUPABASE_URL")
            .map_err(|_| ConfigError::Missing("SUPABASE_URL"))
            .and_then(|raw| parse_base_url(&raw, "SUPABASE_URL"))?;

        let supabase_service_key = std::env::var("SUPABASE_SERVICE_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_SERVICE_KEY"))?;

        let auth_base_url = match std::env::var("AUTH_BASE_URL") {
            Ok(raw) if !raw.trim().is_empty() => parse_base_url(&raw, "AUTH_BASE_URL")?,
            _ => supabase_url.clone(),
        };

        let auth_api_key = std::env::var("AUTH_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| supabase_service_key.clone());

        let upstream_timeout = std::env::var("UPSTREAM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let request_timeout = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let fail_request_on_log_error = match std::env::var("FAIL_REQUEST_ON_LOG_ERROR") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid("FAIL_REQUEST_ON_LOG_ERROR"))?,
            Err(_) => false,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            supabase_url,
            supabase_service_key,
            auth_base_url,
            auth_api_key,
            upstream_timeout,
            request_timeout,
            activity_log_policy: ActivityLogPolicy::from_flag(fail_request_on_log_error),
        })
    }
}

fn parse_base_url(raw: &str, key: &'static str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid(key))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::Invalid(key)),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
