use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of probing the backend root endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    pub available: bool,
    pub message: String,
    pub timestamp: Option<String>,
    pub response_time: Duration,
}
