//! Errors for the autocommit library
//!
//! Enumeration for all errors that can occur while talking to the automation backend
//!

use derive_more::{Display, Error};
use std::io;

use crate::model::NameConflict;

pub mod string_error;

pub use crate::error::string_error::StringError;

pub const NOT_AUTHENTICATED: &str =
    "Not signed in. Open the login url printed by:\n\n  autocommit login\n\nthen store your session cookie with:\n\n  autocommit config --session-cookie <COOKIE>\n";

pub const CONFIG_NOT_FOUND: &str =
    "autocommit not configured, set the backend url with:\n\n  autocommit config --base-url <URL>\n";

pub const FAILED_TO_CREATE_REPOSITORY: &str = "Failed to create repository";

pub const NO_RESPONSE_FROM_SERVER: &str =
    "No response received from server. Please check your connection.";

pub const REPOSITORY_INFO_MISSING: &str = "Repository information is missing";

pub const FAILED_TO_LOAD_COMMIT_HISTORY: &str = "Failed to load commit history";

pub const INVALID_REPOSITORY_NAME: &str =
    "Repository names can only contain alphanumeric characters, hyphens, and underscores.";

#[derive(Debug, Display, Error)]
pub enum AutoCommitError {
    /// Internal autocommit errors
    // Session
    Unauthenticated(StringError),
    ConfigNotFound(Box<StringError>),

    // Repository creation
    NameConflict(Box<NameConflict>),
    InvalidRepositoryName(StringError),
    ServerRejected(StringError),
    NoResponse(StringError),
    RequestConstruction(StringError),

    // Commit history
    RepositoryInfoMissing(StringError),
    CommitHistoryUnavailable(StringError),

    // External Library Errors
    IO(io::Error),
    TomlSer(toml::ser::Error),
    TomlDe(toml::de::Error),
    URL(url::ParseError),
    JSON(serde_json::Error),
    HTTP(reqwest::Error),
    ENV(std::env::VarError),

    // Fallback
    Basic(StringError),
}

impl AutoCommitError {
    pub fn basic_str(s: impl AsRef<str>) -> Self {
        AutoCommitError::Basic(StringError::from(s.as_ref()))
    }

    pub fn unauthenticated() -> Self {
        AutoCommitError::Unauthenticated(StringError::from(NOT_AUTHENTICATED))
    }

    pub fn config_not_found() -> Self {
        AutoCommitError::ConfigNotFound(Box::new(StringError::from(CONFIG_NOT_FOUND)))
    }

    pub fn home_dir_not_found() -> Self {
        AutoCommitError::basic_str("Home directory not found")
    }

    pub fn name_conflict(conflict: NameConflict) -> Self {
        AutoCommitError::NameConflict(Box::new(conflict))
    }

    pub fn invalid_repository_name(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return AutoCommitError::InvalidRepositoryName(StringError::from(
                "Repository name is required.",
            ));
        }
        AutoCommitError::InvalidRepositoryName(StringError::from(format!(
            "Invalid repository name '{name}'. {INVALID_REPOSITORY_NAME}"
        )))
    }

    /// The server answered, but with an error. Falls back to the generic
    /// creation message when the body carried no `error` field.
    pub fn server_rejected(msg: Option<String>) -> Self {
        let msg = msg.unwrap_or_else(|| FAILED_TO_CREATE_REPOSITORY.to_string());
        AutoCommitError::ServerRejected(StringError::from(msg))
    }

    pub fn no_response() -> Self {
        AutoCommitError::NoResponse(StringError::from(NO_RESPONSE_FROM_SERVER))
    }

    pub fn request_construction(msg: impl AsRef<str>) -> Self {
        let msg = msg.as_ref();
        if msg.is_empty() {
            return AutoCommitError::RequestConstruction(StringError::from(
                FAILED_TO_CREATE_REPOSITORY,
            ));
        }
        AutoCommitError::RequestConstruction(StringError::from(msg))
    }

    pub fn repository_info_missing() -> Self {
        AutoCommitError::RepositoryInfoMissing(StringError::from(REPOSITORY_INFO_MISSING))
    }

    pub fn commit_history_unavailable() -> Self {
        AutoCommitError::CommitHistoryUnavailable(StringError::from(
            FAILED_TO_LOAD_COMMIT_HISTORY,
        ))
    }

    /// Maps a transport level failure from reqwest into the no-response /
    /// request-construction split shown to users.
    pub fn from_send_error(error: reqwest::Error) -> Self {
        if error.is_builder() {
            AutoCommitError::request_construction(error.to_string())
        } else {
            log::error!("request failed without a response: {error:?}");
            AutoCommitError::no_response()
        }
    }

    /// Message suitable for showing to the user next to a form.
    pub fn user_message(&self) -> String {
        match self {
            AutoCommitError::NameConflict(conflict) => conflict.error.to_owned(),
            err => err.to_string(),
        }
    }
}

// if you do not want to call .map_err, implement the std::convert::From trait
impl From<io::Error> for AutoCommitError {
    fn from(error: io::Error) -> Self {
        AutoCommitError::IO(error)
    }
}

impl From<String> for AutoCommitError {
    fn from(error: String) -> Self {
        AutoCommitError::Basic(StringError::from(error))
    }
}

impl From<toml::ser::Error> for AutoCommitError {
    fn from(error: toml::ser::Error) -> Self {
        AutoCommitError::TomlSer(error)
    }
}

impl From<toml::de::Error> for AutoCommitError {
    fn from(error: toml::de::Error) -> Self {
        AutoCommitError::TomlDe(error)
    }
}

impl From<url::ParseError> for AutoCommitError {
    fn from(error: url::ParseError) -> Self {
        AutoCommitError::URL(error)
    }
}

impl From<serde_json::Error> for AutoCommitError {
    fn from(error: serde_json::Error) -> Self {
        AutoCommitError::JSON(error)
    }
}

impl From<reqwest::Error> for AutoCommitError {
    fn from(error: reqwest::Error) -> Self {
        AutoCommitError::HTTP(error)
    }
}

impl From<std::env::VarError> for AutoCommitError {
    fn from(error: std::env::VarError) -> Self {
        AutoCommitError::ENV(error)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AutoCommitError;
    use crate::model::NameConflict;

    #[test]
    fn test_server_rejected_defaults_to_generic_message() {
        let err = AutoCommitError::server_rejected(None);
        assert_eq!(err.to_string(), "Failed to create repository");

        let err = AutoCommitError::server_rejected(Some("Bad credentials".to_string()));
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[test]
    fn test_name_conflict_user_message() {
        let conflict = NameConflict {
            error: String::from("Repository 'streak' already exists"),
            suggested_names: vec![String::from("streak-octocat")],
        };
        let err = AutoCommitError::name_conflict(conflict);
        assert_eq!(err.user_message(), "Repository 'streak' already exists");
    }

    #[test]
    fn test_invalid_repository_name_messages() {
        let err = AutoCommitError::invalid_repository_name("  ");
        assert_eq!(err.to_string(), "Repository name is required.");

        let err = AutoCommitError::invalid_repository_name("my repo");
        assert!(err.to_string().contains("alphanumeric characters"));
    }
}
