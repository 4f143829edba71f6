use serde::{Deserialize, Serialize};

/// Body of the backend root endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
