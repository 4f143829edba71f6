use crate::model::CommitRecord;

/// Where a commit listing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitSource {
    Backend,
    GitHubPublic,
}

/// Why the backend listing was abandoned for the public GitHub API.
///
/// Kept apart so "the backend has no record of this repo" is not confused with
/// "the backend is down".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// 2xx, but the body was not a list of commits
    InvalidPayload,
    /// The backend answered with this status code
    BackendError(u16),
    /// No response at all
    Unreachable,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::InvalidPayload => write!(f, "invalid response format from server"),
            FallbackReason::BackendError(status) => write!(f, "server responded with {status}"),
            FallbackReason::Unreachable => write!(f, "server unreachable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitHistory {
    pub commits: Vec<CommitRecord>,
    pub source: CommitSource,
    pub fallback_reason: Option<FallbackReason>,
}

impl CommitHistory {
    pub fn from_backend(commits: Vec<CommitRecord>) -> CommitHistory {
        CommitHistory {
            commits,
            source: CommitSource::Backend,
            fallback_reason: None,
        }
    }

    pub fn from_fallback(commits: Vec<CommitRecord>, reason: FallbackReason) -> CommitHistory {
        CommitHistory {
            commits,
            source: CommitSource::GitHubPublic,
            fallback_reason: Some(reason),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}
