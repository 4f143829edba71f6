use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::constants::FALLBACK_COMMITS_PAGE_SIZE;
use crate::error::AutoCommitError;
use crate::model::{CommitHistory, CommitRecord, FallbackReason};

/// `GET /api/commits` on the backend origin.
///
/// Anything other than a JSON array of commit records is reported as the
/// [`FallbackReason`] that would send [`list_with_fallback`] to GitHub.
pub async fn list(config: &ClientConfig) -> Result<Vec<CommitRecord>, FallbackReason> {
    let url = match api::endpoint::url_from_origin(config, "/api/commits") {
        Ok(url) => url,
        Err(err) => {
            log::error!("api::client::commits::list bad base url: {err}");
            return Err(FallbackReason::Unreachable);
        }
    };
    log::debug!("api::client::commits::list {}", url);

    let client = client::new_for_config(config).map_err(|err| {
        log::error!("api::client::commits::list could not build client: {err}");
        FallbackReason::Unreachable
    })?;

    let res = match client.get(&url).send().await {
        Ok(res) => res,
        Err(err) => {
            log::error!("Failed to list commits at url {url}\n{err:?}");
            return Err(FallbackReason::Unreachable);
        }
    };

    let status = res.status();
    if !status.is_success() {
        log::debug!("api::client::commits::list status {status}");
        return Err(FallbackReason::BackendError(status.as_u16()));
    }

    let body = match res.text().await {
        Ok(body) => body,
        Err(err) => {
            log::error!("Failed to read commits body from {url}\n{err:?}");
            return Err(FallbackReason::Unreachable);
        }
    };

    let value: serde_json::Value =
        serde_json::from_str(&body).map_err(|_| FallbackReason::InvalidPayload)?;
    if !value.is_array() {
        log::debug!("api::client::commits::list expected an array, got {body}");
        return Err(FallbackReason::InvalidPayload);
    }
    serde_json::from_value(value).map_err(|err| {
        log::debug!("api::client::commits::list could not decode records: {err}");
        FallbackReason::InvalidPayload
    })
}

/// Commit history for `owner/repo_name`, from the backend when it can answer and
/// from the public GitHub API otherwise. The fallback is tried once.
pub async fn list_with_fallback(
    config: &ClientConfig,
    owner: Option<&str>,
    repo_name: Option<&str>,
) -> Result<CommitHistory, AutoCommitError> {
    let (Some(owner), Some(repo_name)) = (
        owner.filter(|owner| !owner.is_empty()),
        repo_name.filter(|name| !name.is_empty()),
    ) else {
        return Err(AutoCommitError::repository_info_missing());
    };

    let reason = match list(config).await {
        Ok(commits) => return Ok(CommitHistory::from_backend(commits)),
        Err(reason) => reason,
    };

    if !config.commit_history_fallback {
        log::warn!("commit history unavailable ({reason}), fallback disabled");
        return Err(AutoCommitError::commit_history_unavailable());
    }

    log::warn!(
        "commit history from backend failed ({reason}), falling back to GitHub for {owner}/{repo_name}"
    );
    match api::client::github::list_public_commits(
        config,
        owner,
        repo_name,
        FALLBACK_COMMITS_PAGE_SIZE,
    )
    .await
    {
        Ok(commits) => Ok(CommitHistory::from_fallback(commits, reason)),
        Err(err) => {
            log::error!("GitHub fallback failed for {owner}/{repo_name}: {err}");
            Err(AutoCommitError::commit_history_unavailable())
        }
    }
}
