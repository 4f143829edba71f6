use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::error::AutoCommitError;
use crate::model::Session;
use crate::view::SuccessMessage;

/// `GET /user`. A 401 comes back as an error here, `core::session` folds it into Anonymous.
pub async fn get_user(config: &ClientConfig) -> Result<Session, AutoCommitError> {
    let url = api::endpoint::url_from_base(config, "/user");
    log::debug!("api::client::session::get_user {}", url);

    let client = client::new_for_config(config)?;
    let res = client.get(&url).send().await?;
    client::parse_json_body(&url, res).await
}

/// `POST /logout`
pub async fn logout(config: &ClientConfig) -> Result<(), AutoCommitError> {
    let url = api::endpoint::url_from_base(config, "/logout");
    log::debug!("api::client::session::logout {}", url);

    let client = client::new_for_config(config)?;
    match client.post(&url).send().await {
        Ok(res) => {
            let status = res.status();
            if !status.is_success() {
                return Err(AutoCommitError::basic_str(format!(
                    "Logout failed with status [{status}] from url {url}"
                )));
            }
            // Body is {"success": true} but older backends return nothing
            let body = res.text().await?;
            if let Ok(message) = serde_json::from_str::<SuccessMessage>(&body) {
                log::debug!("logout success: {}", message.success);
            }
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to logout at url {url}\n{err:?}");
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
    async fn test_get_user_authenticated() -> Result<(), AutoCommitError> {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let mock = server
            .mock("GET", "/api/user")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"authenticated": true, "username": "octocat", "hasRepository": false, "repositoryName": null}"#,
            )
            .create_async()
            .await;

        let session = api::client::session::get_user(&config).await?;
        assert!(session.authenticated);
        assert_eq!(session.username.as_deref(), Some("octocat"));
        assert_eq!(session.repository_name(), None);

        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_get_user_sends_session_cookie() -> Result<(), AutoCommitError> {
        let mut server = mockito::Server::new_async().await;
        let mut config = test::config_for(&server.url());
        config.set_session_cookie("abc123");

        let mock = server
            .mock("GET", "/api/user")
            .match_header("cookie", "session=abc123")
            .with_status(200)
            .with_body(r#"{"authenticated": true, "username": "octocat"}"#)
            .create_async()
            .await;

        let session = api::client::session::get_user(&config).await?;
        assert!(session.authenticated);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_get_user_unauthorized_is_error() {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let _mock = server
            .mock("GET", "/api/user")
            .with_status(401)
            .with_body(r#"{"authenticated": false}"#)
            .create_async()
            .await;

        let result = api::client::session::get_user(&config).await;
        assert!(matches!(result, Err(AutoCommitError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_logout() -> Result<(), AutoCommitError> {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let mock = server
            .mock("POST", "/api/logout")
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        api::client::session::logout(&config).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_logout_server_error() {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let _mock = server
            .mock("POST", "/api/logout")
            .with_status(500)
            .create_async()
            .await;

        let result = api::client::session::logout(&config).await;
        assert!(result.is_err());
    }
}
