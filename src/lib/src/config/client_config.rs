use crate::constants::{BASE_URL_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_GITHUB_API_URL};
use crate::error::AutoCommitError;
use crate::util;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CLIENT_CONFIG_FILENAME: &str = "client_config.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend url including its api prefix, e.g. http://localhost:5000/api
    pub base_url: String,
    /// Value of the backend session cookie, copied from the browser after login
    #[serde(default)]
    pub session_cookie: Option<String>,
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,
    /// Fall back to the public GitHub API when the backend cannot list commits
    #[serde(default = "default_commit_history_fallback")]
    pub commit_history_fallback: bool,
    /// Set when the env replaced `base_url`, so saving writes the file's url back
    #[serde(skip)]
    env_override: Option<EnvOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EnvOverride {
    file_base_url: String,
    env_base_url: String,
}

fn default_github_api_url() -> String {
    String::from(DEFAULT_GITHUB_API_URL)
}

fn default_commit_history_fallback() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::new_empty()
    }
}

impl ClientConfig {
    pub fn new(path: &Path) -> Result<ClientConfig, AutoCommitError> {
        let contents = util::fs::read_from_path(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn new_empty() -> ClientConfig {
        ClientConfig {
            base_url: String::from(DEFAULT_BASE_URL),
            session_cookie: None,
            github_api_url: default_github_api_url(),
            commit_history_fallback: default_commit_history_fallback(),
            env_override: None,
        }
    }

    pub fn from_base_url(base_url: impl AsRef<str>) -> ClientConfig {
        ClientConfig {
            base_url: String::from(base_url.as_ref()),
            ..ClientConfig::new_empty()
        }
    }

    fn config_file() -> Result<PathBuf, AutoCommitError> {
        if std::env::var("TEST").is_ok() {
            return Ok(PathBuf::from("data/test/config").join(CLIENT_CONFIG_FILENAME));
        }
        Ok(util::fs::config_dir()?.join(CLIENT_CONFIG_FILENAME))
    }

    pub fn get() -> Result<ClientConfig, AutoCommitError> {
        let config_file = ClientConfig::config_file()?;
        log::debug!("looking for config file in...{:?}", config_file);
        ClientConfig::load(&config_file)
    }

    /// Reads the file at `path` and applies the env override
    pub fn load(path: &Path) -> Result<ClientConfig, AutoCommitError> {
        if path.exists() {
            let mut config = ClientConfig::new(path)?;
            config.apply_env();
            Ok(config)
        } else {
            log::debug!("unable to find config file at {:?}", path);
            Err(AutoCommitError::config_not_found())
        }
    }

    pub fn get_or_create() -> Result<ClientConfig, AutoCommitError> {
        let config_file = ClientConfig::config_file()?;
        ClientConfig::load_or_create(&config_file)
    }

    /// Only a missing file is created with defaults. A file that fails to parse is never
    /// overwritten.
    pub fn load_or_create(path: &Path) -> Result<ClientConfig, AutoCommitError> {
        match ClientConfig::load(path) {
            Err(AutoCommitError::ConfigNotFound(_)) => {
                let mut config = ClientConfig::new_empty();
                config.save(path)?;
                println!("created a new config file in {}", path.display());
                config.apply_env();
                Ok(config)
            }
            result => result,
        }
    }

    /// `AUTOCOMMIT_API_BASE_URL` wins over the file, so a `.env` can point at another backend
    pub fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV_VAR) {
            let base_url = base_url.trim();
            if !base_url.is_empty() {
                log::debug!("using base url from {BASE_URL_ENV_VAR}: {base_url}");
                let file_base_url = match self.env_override.take() {
                    Some(env_override) => env_override.file_base_url,
                    None => self.base_url.clone(),
                };
                self.env_override = Some(EnvOverride {
                    file_base_url,
                    env_base_url: String::from(base_url),
                });
                self.base_url = String::from(base_url);
            }
        }
    }

    /// What gets written to disk: the file's own base url unless it was changed
    /// after the env override was applied
    fn persisted(&self) -> ClientConfig {
        let mut config = self.clone();
        if let Some(env_override) = config.env_override.take() {
            if config.base_url == env_override.env_base_url {
                config.base_url = env_override.file_base_url;
            }
        }
        config
    }

    pub fn save_default(&self) -> Result<(), AutoCommitError> {
        let config_file = ClientConfig::config_file()?;
        log::debug!("Saving config to {:?}", config_file);
        self.save(&config_file)
    }

    pub fn save(&self, path: &Path) -> Result<(), AutoCommitError> {
        let toml = toml::to_string(&self.persisted())?;
        util::fs::write_to_path(path, toml)?;
        Ok(())
    }

    pub fn set_session_cookie(&mut self, cookie: impl AsRef<str>) {
        let cookie = cookie.as_ref().trim();
        if cookie.is_empty() {
            self.session_cookie = None;
        } else {
            self.session_cookie = Some(String::from(cookie));
        }
    }

    pub fn clear_session_cookie(&mut self) {
        self.session_cookie = None;
    }
}
