use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::error::AutoCommitError;
use crate::model::AutomationStatus;

/// `GET /github/status`
pub async fn get(config: &ClientConfig) -> Result<AutomationStatus, AutoCommitError> {
    let url = api::endpoint::url_from_base(config, "/github/status");
    log::debug!("api::client::status::get {}", url);

    let client = client::new_for_config(config)?;
    match client.get(&url).send().await {
        Ok(res) => {
            let status: AutomationStatus = client::parse_json_body(&url, res).await?;
            log::debug!(
                "api::client::status::get next commit {:?}",
                status.next_commit
            );
            Ok(status)
        }
        Err(err) => {
            log::error!("Failed to get status at url {url}\n{err:?}");
            Err(AutoCommitError::from_send_error(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api;
    use crate::error::AutoCommitError;
    use crate::test;

    #[tokio::test]
    async fn test_get_status_with_scheduled_commit() -> Result<(), AutoCommitError> {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let mock = server
            .mock("GET", "/api/github/status")
            .with_status(200)
            .with_body(
                r#"{
                    "active": true,
                    "hasRepository": true,
                    "repo_name": "daily-streak",
                    "scheduled_commits": 3,
                    "total_commits": 10,
                    "next_commit": {
                        "has_scheduled_commits": true,
                        "formatted_time": "2026-10-17 15:00:00",
                        "formatted_countdown": "00:10:00",
                        "seconds_until_next": 600
                    }
                }"#,
            )
            .create_async()
            .await;

        let status = api::client::status::get(&config).await?;
        assert_eq!(status.repo_name(), Some("daily-streak"));
        assert_eq!(status.next_commit.seconds_until_next(), Some(600));
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_get_status_without_repository() -> Result<(), AutoCommitError> {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let _mock = server
            .mock("GET", "/api/github/status")
            .with_status(200)
            .with_body(
                r#"{
                    "active": false,
                    "hasRepository": false,
                    "repo_name": null,
                    "scheduled_commits": 0,
                    "total_commits": 0,
                    "next_commit": {
                        "has_scheduled_commits": false,
                        "formatted_time": null,
                        "formatted_countdown": null
                    }
                }"#,
            )
            .create_async()
            .await;

        let status = api::client::status::get(&config).await?;
        assert!(!status.active);
        assert_eq!(status.repo_name(), None);
        assert_eq!(status.next_commit.seconds_until_next(), None);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_status_unauthenticated() {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let _mock = server
            .mock("GET", "/api/github/status")
            .with_status(401)
            .with_body(r#"{"error": "Not authenticated"}"#)
            .create_async()
            .await;

        let result = api::client::status::get(&config).await;
        assert!(matches!(result, Err(AutoCommitError::Unauthenticated(_))));
    }
}
