//! # API Client - For talking to the automation backend and the public GitHub API
//!

use crate::config::ClientConfig;
use crate::constants;
use crate::error::AutoCommitError;
use crate::view::ErrorResponse;
use reqwest::{header, Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time;

pub mod commits;
pub mod github;
pub mod health;
pub mod repositories;
pub mod session;
pub mod status;

const VERSION: &str = constants::AUTOCOMMIT_VERSION;
const USER_AGENT: &str = constants::AUTOCOMMIT;

/// Client for the automation backend, carrying the session cookie when one is configured
pub fn new_for_config(config: &ClientConfig) -> Result<Client, AutoCommitError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    if let Some(cookie) = &config.session_cookie {
        log::debug!("Setting session cookie for {}", config.base_url);
        headers.insert(header::COOKIE, session_cookie_header(cookie)?);
    } else {
        log::trace!("No session cookie configured for {}", config.base_url);
    }

    match builder().default_headers(headers).build() {
        Ok(client) => Ok(client),
        Err(reqwest_err) => Err(AutoCommitError::HTTP(reqwest_err)),
    }
}

/// Client for unauthenticated calls to the public GitHub API
pub fn new_public() -> Result<Client, AutoCommitError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/vnd.github+json"),
    );
    match builder().default_headers(headers).build() {
        Ok(client) => Ok(client),
        Err(reqwest_err) => Err(AutoCommitError::HTTP(reqwest_err)),
    }
}

fn builder() -> ClientBuilder {
    Client::builder()
        .user_agent(format!("{USER_AGENT}/{VERSION}"))
        .timeout(time::Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS))
}

fn session_cookie_header(cookie: &str) -> Result<header::HeaderValue, AutoCommitError> {
    // A bare value is the flask session cookie, anything with '=' is passed through
    let cookie = if cookie.contains('=') {
        String::from(cookie)
    } else {
        format!("{}={}", constants::SESSION_COOKIE_NAME, cookie)
    };
    let mut value = match header::HeaderValue::from_str(&cookie) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("api::client invalid cookie header value: {}", err);
            return Err(AutoCommitError::basic_str(
                "Error setting the session cookie. Please check your autocommit config.",
            ));
        }
    };
    value.set_sensitive(true);
    Ok(value)
}

/// Reads the body and deserializes it, turning non-2xx responses into errors
pub async fn parse_json_body<T: DeserializeOwned>(
    url: &str,
    res: reqwest::Response,
) -> Result<T, AutoCommitError> {
    let status = res.status();
    let body = res.text().await?;

    log::debug!("url: {url}\nstatus: {status}\nbody: {body}");

    if status == StatusCode::UNAUTHORIZED {
        return Err(AutoCommitError::unauthenticated());
    }

    if !status.is_success() {
        let msg = ErrorResponse::from_body(&body)
            .and_then(|response| response.error)
            .unwrap_or_else(|| String::from(status.canonical_reason().unwrap_or("unknown")));
        return Err(AutoCommitError::basic_str(format!(
            "Err status [{status}] from url {url} [{msg}]"
        )));
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(err) => {
            log::debug!("Err: {}", err);
            Err(AutoCommitError::basic_str(format!(
                "Could not deserialize response from [{url}]\n{status}\n'{body}'"
            )))
        }
    }
}
