use serde::{Deserialize, Serialize};

use crate::model::{CommitId, CommitRecord};

/// One item of `GET /repos/{owner}/{repo}/commits` on the public GitHub API
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GitHubCommitView {
    pub sha: String,
    pub html_url: String,
    pub commit: GitHubCommitDetail,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GitHubCommitDetail {
    pub message: String,
    #[serde(default)]
    pub author: Option<GitHubCommitAuthor>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GitHubCommitAuthor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl GitHubCommitView {
    pub fn into_record(self, owner: &str, repo_name: &str) -> CommitRecord {
        let timestamp = self
            .commit
            .author
            .and_then(|author| author.date)
            .unwrap_or_default();
        CommitRecord {
            id: CommitId::Sha(self.sha.clone()),
            username: Some(String::from(owner)),
            repo_name: String::from(repo_name),
            commit_sha: self.sha,
            commit_message: self.commit.message,
            commit_url: self.html_url,
            timestamp,
        }
    }
}
