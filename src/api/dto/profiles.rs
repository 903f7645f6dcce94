use serde::Serialize;
use serde_json::Value;

/// `role` is `null` both when no profile exists and when none is assigned.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: Value,
}
