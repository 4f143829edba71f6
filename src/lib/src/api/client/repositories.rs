use reqwest::StatusCode;

use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::error::AutoCommitError;
use crate::model::{Repository, RepositoryNew};
use crate::view::{ErrorResponse, RepositoryConflictResponse, RepositoryCreationResponse};

/// `POST /create-repository`
///
/// Failures come back in three flavours so the caller can word them differently:
/// a structured [`AutoCommitError::NameConflict`] on 409, [`AutoCommitError::ServerRejected`]
/// for any other error response, and [`AutoCommitError::NoResponse`] or
/// [`AutoCommitError::RequestConstruction`] when nothing came back at all.
pub async fn create(
    config: &ClientConfig,
    repo: &RepositoryNew,
) -> Result<Repository, AutoCommitError> {
    let url = api::endpoint::url_from_base(config, "/create-repository");
    log::debug!("Create repository: {} {}", url, repo);

    let client = client::new_for_config(config)?;
    let res = match client.post(&url).json(repo).send().await {
        Ok(res) => res,
        Err(err) => {
            log::error!("Failed to create repository at url {url}\n{err:?}");
            return Err(AutoCommitError::from_send_error(err));
        }
    };

    let status = res.status();
    let body = res.text().await?;
    log::debug!("repositories::create status {} response {}", status, body);

    if status == StatusCode::CONFLICT {
        if let Ok(conflict) = serde_json::from_str::<RepositoryConflictResponse>(&body) {
            if conflict.name_conflict {
                return Err(AutoCommitError::name_conflict(
                    conflict.into_conflict(&repo.repo_name),
                ));
            }
            return Err(AutoCommitError::server_rejected(conflict.error));
        }
    }

    if !status.is_success() {
        let msg = ErrorResponse::from_body(&body).and_then(|response| response.error);
        return Err(AutoCommitError::server_rejected(msg));
    }

    match serde_json::from_str::<RepositoryCreationResponse>(&body) {
        Ok(response) => Ok(response.repo),
        Err(err) => {
            log::debug!("Err: {}", err);
            Err(AutoCommitError::basic_str(format!(
                "api::repositories::create() Could not deserialize repository [{url}]"
            )))
        }
    }
}
