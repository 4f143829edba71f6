use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Backend rows use an integer id, the GitHub fallback uses the sha
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CommitId {
    Row(i64),
    Sha(String),
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitId::Row(id) => write!(f, "{id}"),
            CommitId::Sha(sha) => write!(f, "{sha}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: CommitId,
    #[serde(default)]
    pub username: Option<String>,
    pub repo_name: String,
    #[serde(default)]
    pub commit_sha: String,
    pub commit_message: String,
    pub commit_url: String,
    pub timestamp: String,
}

impl CommitRecord {
    pub fn short_sha(&self) -> &str {
        let end = self
            .commit_sha
            .char_indices()
            .nth(7)
            .map(|(idx, _)| idx)
            .unwrap_or(self.commit_sha.len());
        &self.commit_sha[..end]
    }

    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.commit_message.lines().next().unwrap_or("")
    }

    /// Parses the timestamp, accepting RFC 3339 (GitHub) and naive ISO 8601 (backend)
    pub fn local_timestamp(&self) -> Option<DateTime<Local>> {
        if let Ok(date) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(date.with_timezone(&Local));
        }
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .and_then(|naive| naive.and_local_timezone(Local).earliest())
    }
}
