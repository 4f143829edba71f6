use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SuccessMessage {
    #[serde(default)]
    pub success: bool,
}
