use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::error::AutoCommitError;
use crate::model::CommitRecord;
use crate::view::GitHubCommitView;

/// Latest commits of a public repository, straight from the GitHub API
pub async fn list_public_commits(
    config: &ClientConfig,
    owner: &str,
    repo_name: &str,
    per_page: usize,
) -> Result<Vec<CommitRecord>, AutoCommitError> {
    let url = api::endpoint::github_commits_url(config, owner, repo_name);
    log::debug!("api::client::github::list_public_commits {} per_page={}", url, per_page);

    let client = client::new_public()?;
    let res = client
        .get(&url)
        .query(&[("per_page", per_page)])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        log::debug!("github commits status {status} body {body}");
        return Err(AutoCommitError::basic_str(format!(
            "GitHub responded with [{status}] for {owner}/{repo_name}"
        )));
    }

    let body = res.text().await?;
    let views: Vec<GitHubCommitView> = match serde_json::from_str(&body) {
        Ok(views) => views,
        Err(err) => {
            log::debug!("Err: {}", err);
            return Err(AutoCommitError::basic_str(format!(
                "Could not deserialize GitHub commits from [{url}]"
            )));
        }
    };

    Ok(views
        .into_iter()
        .map(|view| view.into_record(owner, repo_name))
        .collect())
}
