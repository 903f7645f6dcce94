use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub action: String,
    #[serde(default)]
    pub detail: Option<String>,
}

impl CreateActivityRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.action.trim().is_empty() {
            return Err("action is required");
        }
        Ok(())
    }
}
