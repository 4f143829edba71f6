use std::time::Instant;

use crate::api;
use crate::api::client;
use crate::config::ClientConfig;
use crate::model::ServerStatus;
use crate::view::HealthResponse;

/// Probes `GET /` on the backend origin. Failures are reported in the returned
/// [`ServerStatus`] rather than as an error.
pub async fn check(config: &ClientConfig) -> ServerStatus {
    let start = Instant::now();
    let unavailable = |message: String| ServerStatus {
        available: false,
        message,
        timestamp: None,
        response_time: start.elapsed(),
    };

    let url = match api::endpoint::url_from_origin(config, "/") {
        Ok(url) => url,
        Err(err) => return unavailable(format!("Invalid server url: {err}")),
    };
    log::debug!("api::client::health::check {}", url);

    let client = match client::new_for_config(config) {
        Ok(client) => client,
        Err(err) => return unavailable(err.to_string()),
    };

    let res = match client.get(&url).send().await {
        Ok(res) => res,
        Err(err) => {
            log::error!("Server check failed at url {url}\n{err:?}");
            return unavailable(String::from("Server is not responding"));
        }
    };

    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    let response_time = start.elapsed();
    log::debug!("api::client::health::check status {status} in {response_time:?}");

    if !status.is_success() {
        return ServerStatus {
            available: false,
            message: format!("Server responded with status {}", status.as_u16()),
            timestamp: None,
            response_time,
        };
    }

    let health: Option<HealthResponse> = serde_json::from_str(&body).ok();
    let (message, timestamp) = match health {
        Some(health) => (
            health
                .message
                .unwrap_or_else(|| String::from("Server is running")),
            health.timestamp,
        ),
        None => (String::from("Server is running"), None),
    };

    ServerStatus {
        available: true,
        message,
        timestamp,
        response_time,
    }
}

#[cfg(test)]
mod tests {
    use crate::api;
    use crate::config::ClientConfig;
    use crate::test;

    #[tokio::test]
    async fn test_check_available() {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let mock = server
            .mock("GET", "/")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(
                r#"{"status": "ok", "message": "Auto Commit API is running", "timestamp": "2026-10-17T09:30:00"}"#,
            )
            .create_async()
            .await;

        let status = api::client::health::check(&config).await;
        assert!(status.available);
        assert_eq!(status.message, "Auto Commit API is running");
        assert_eq!(status.timestamp.as_deref(), Some("2026-10-17T09:30:00"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_check_non_json_body_still_available() {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let status = api::client::health::check(&config).await;
        assert!(status.available);
        assert_eq!(status.message, "Server is running");
        assert_eq!(status.timestamp, None);
    }

    #[tokio::test]
    async fn test_check_server_error() {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let _mock = server
            .mock("GET", "/")
            .with_status(502)
            .create_async()
            .await;

        let status = api::client::health::check(&config).await;
        assert!(!status.available);
        assert_eq!(status.message, "Server responded with status 502");
    }

    #[tokio::test]
    async fn test_check_unreachable() {
        let config = ClientConfig::from_base_url("http://127.0.0.1:1/api");
        let status = api::client::health::check(&config).await;
        assert!(!status.available);
        assert_eq!(status.message, "Server is not responding");
    }
}
