use serde::{Deserialize, Serialize};

/// Who the backend thinks is signed in.
///
/// Re-fetched on every navigation, never cached.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(
        default,
        rename = "hasRepository",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_repository: Option<bool>,
    #[serde(
        default,
        rename = "repositoryName",
        skip_serializing_if = "Option::is_none"
    )]
    pub repository_name: Option<String>,
}

impl Session {
    pub fn anonymous() -> Session {
        Session::default()
    }

    /// The repository the user created through the service, if the session reports one
    pub fn repository_name(&self) -> Option<&str> {
        if !self.authenticated || !self.has_repository.unwrap_or(false) {
            return None;
        }
        self.repository_name.as_deref().filter(|name| !name.is_empty())
    }
}
