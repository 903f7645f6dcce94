/*
 * Responsibility
 * - request/response DTO
 * - validation (形式チェック) は各 request の validate() に持たせる
 */
pub mod activities;
pub mod notifications;
pub mod profiles;

use serde::Serialize;

/// `{ok: true, data: [row]}` returned by the insert endpoints.
#[derive(Debug, Serialize)]
pub struct CreatedResponse<T> {
    pub ok: bool,
    pub data: Vec<T>,
}

impl<T> CreatedResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { ok: true, data }
    }
}
