use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::constants::{DEFAULT_REPO_DESCRIPTION, GITHUB_WEB_URL};
use crate::error::AutoCommitError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Repository {
    /// The repository as the service sees it: github.com/{owner}/{name}
    pub fn for_owner(owner: impl AsRef<str>, name: impl AsRef<str>) -> Repository {
        let name = name.as_ref();
        Repository {
            name: String::from(name),
            html_url: format!("{}/{}/{}", GITHUB_WEB_URL, owner.as_ref(), name),
            description: Some(String::from(DEFAULT_REPO_DESCRIPTION)),
        }
    }
}

/// Body of `POST /create-repository`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryNew {
    #[serde(rename = "repoName")]
    pub repo_name: String,
    pub description: String,
}

impl std::fmt::Display for RepositoryNew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repo_name)
    }
}

fn valid_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid repository name regex"))
}

impl RepositoryNew {
    pub fn new(repo_name: impl AsRef<str>) -> RepositoryNew {
        RepositoryNew {
            repo_name: String::from(repo_name.as_ref().trim()),
            description: String::from(DEFAULT_REPO_DESCRIPTION),
        }
    }

    pub fn with_description(mut self, description: impl AsRef<str>) -> RepositoryNew {
        self.description = String::from(description.as_ref());
        self
    }

    pub fn validate(&self) -> Result<(), AutoCommitError> {
        if valid_name_regex().is_match(&self.repo_name) {
            Ok(())
        } else {
            Err(AutoCommitError::invalid_repository_name(&self.repo_name))
        }
    }
}

/// Returned with a 409 when the repository name is already taken on GitHub
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NameConflict {
    pub error: String,
    pub suggested_names: Vec<String>,
}

impl std::fmt::Display for NameConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.suggested_names.is_empty() {
            write!(f, "{}", self.error)
        } else {
            write!(
                f,
                "{}\n\nTry one of: {}",
                self.error,
                self.suggested_names.join(", ")
            )
        }
    }
}

impl std::error::Error for NameConflict {}
