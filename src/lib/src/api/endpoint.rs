use url::Url;

use crate::config::ClientConfig;
use crate::error::AutoCommitError;

/// `{base_url}{path}`, e.g. `http://localhost:5000/api` + `/user`
pub fn url_from_base(config: &ClientConfig, path: impl AsRef<str>) -> String {
    let base = config.base_url.trim_end_matches('/');
    let path = path.as_ref();
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Resolves an absolute path against the backend origin, ignoring any api prefix
/// in the base url. `/api/commits` and `/` are served from the origin.
pub fn url_from_origin(
    config: &ClientConfig,
    path: impl AsRef<str>,
) -> Result<String, AutoCommitError> {
    let base = Url::parse(&config.base_url)?;
    let url = base.join(path.as_ref())?;
    Ok(url.to_string())
}

/// Where the browser starts the GitHub OAuth dance
pub fn login_url(config: &ClientConfig) -> String {
    url_from_base(config, "/github/login")
}

/// Public GitHub commits listing for owner/repo
pub fn github_commits_url(config: &ClientConfig, owner: &str, repo_name: &str) -> String {
    format!(
        "{}/repos/{}/{}/commits",
        config.github_api_url.trim_end_matches('/'),
        urlencoding::encode(owner),
        urlencoding::encode(repo_name)
    )
}

#[cfg(test)]
mod tests {
    use crate::api::endpoint;
    use crate::config::ClientConfig;
    use crate::error::AutoCommitError;

    #[test]
    fn test_url_from_base() {
        let config = ClientConfig::from_base_url("http://localhost:5000/api/");
        assert_eq!(
            endpoint::url_from_base(&config, "/user"),
            "http://localhost:5000/api/user"
        );
        assert_eq!(
            endpoint::url_from_base(&config, "github/status"),
            "http://localhost:5000/api/github/status"
        );
    }

    #[test]
    fn test_url_from_origin_drops_api_prefix() -> Result<(), AutoCommitError> {
        let config = ClientConfig::from_base_url("https://automation.example.com:8443/api");
        assert_eq!(
            endpoint::url_from_origin(&config, "/api/commits")?,
            "https://automation.example.com:8443/api/commits"
        );
        assert_eq!(
            endpoint::url_from_origin(&config, "/")?,
            "https://automation.example.com:8443/"
        );
        Ok(())
    }

    #[test]
    fn test_url_from_origin_invalid_base() {
        let config = ClientConfig::from_base_url("not a url");
        assert!(endpoint::url_from_origin(&config, "/").is_err());
    }

    #[test]
    fn test_login_url() {
        let config = ClientConfig::from_base_url("http://localhost:5000/api");
        assert_eq!(
            endpoint::login_url(&config),
            "http://localhost:5000/api/github/login"
        );
    }

    #[test]
    fn test_github_commits_url_encodes_segments() {
        let config = ClientConfig::from_base_url("http://localhost:5000/api");
        assert_eq!(
            endpoint::github_commits_url(&config, "octocat", "daily streak"),
            "https://api.github.com/repos/octocat/daily%20streak/commits"
        );
    }
}
