use serde::{Deserialize, Serialize};

use crate::model::{NameConflict, Repository};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RepositoryCreationResponse {
    #[serde(default)]
    pub success: bool,
    pub repo: Repository,
}

/// 409 body: `{error, name_conflict, suggested_names}`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RepositoryConflictResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub name_conflict: bool,
    #[serde(default)]
    pub suggested_names: Option<Vec<String>>,
}

impl RepositoryConflictResponse {
    pub fn into_conflict(self, repo_name: &str) -> NameConflict {
        NameConflict {
            error: self
                .error
                .unwrap_or_else(|| format!("Repository '{repo_name}' already exists")),
            suggested_names: self.suggested_names.unwrap_or_default(),
        }
    }
}
