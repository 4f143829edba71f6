use serde::{Deserialize, Serialize};

/// `{"error": "..."}` bodies the backend sends alongside non-2xx codes
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Parses the body, returning None when it is not an error object
    pub fn from_body(body: &str) -> Option<ErrorResponse> {
        serde_json::from_str::<ErrorResponse>(body).ok()
    }
}
