use serde::{Deserialize, Serialize};

use crate::repos::Row;

/// Body of `POST /notifications`.
///
/// There is no origin field: the origin is always the verified caller.
/// Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub destination_user: String,
    pub message: String,
}

impl CreateNotificationRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.destination_user.trim().is_empty() {
            return Err("destination_user is required");
        }
        if self.message.trim().is_empty() {
            return Err("message is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Row>,
}
