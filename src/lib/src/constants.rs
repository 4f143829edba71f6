//! Constants used throughout the autocommit client
//!

use std::time::Duration;

/// Version of the client, sent in the User-Agent header
pub const AUTOCOMMIT_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the client, used for the config directory and the User-Agent
pub const AUTOCOMMIT: &str = "autocommit";
/// Config directory, relative to the home directory
pub const CONFIG_DIR: &str = ".config";

/// Backend used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
/// Environment variable that overrides the configured backend url
pub const BASE_URL_ENV_VAR: &str = "AUTOCOMMIT_API_BASE_URL";
/// Public GitHub API, used when the backend cannot serve commit history
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// Where the user-facing repository links point
pub const GITHUB_WEB_URL: &str = "https://github.com";
/// Name of the cookie the backend keeps its session in
pub const SESSION_COOKIE_NAME: &str = "session";

/// Timeout on every request to the backend
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default description for repositories created from the client
pub const DEFAULT_REPO_DESCRIPTION: &str = "Repository for automated commits";

/// Number of commits requested from the public GitHub API fallback
pub const FALLBACK_COMMITS_PAGE_SIZE: usize = 10;

/// The countdown ticks once per second
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);
/// After the countdown elapses, re-fetch status this often
pub const RECONCILE_INTERVAL: Duration = Duration::from_secs(5);
/// Give up reconciling and force a full refresh after this long
pub const RECONCILE_CEILING: Duration = Duration::from_secs(30);

/// Countdown display while waiting for the backend to make the commit
pub const COMMIT_IN_PROGRESS_MSG: &str = "Commit in progress...";
/// Countdown display once the backend reports nothing else scheduled
pub const NO_MORE_COMMITS_MSG: &str = "No more commits scheduled for today";
