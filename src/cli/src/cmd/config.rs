use async_trait::async_trait;
use clap::{Arg, Command};

use libautocommit::config::ClientConfig;
use libautocommit::error::AutoCommitError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "config";
pub struct ConfigCmd;

#[async_trait]
impl RunCmd for ConfigCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Sets the client configuration in ~/.config/autocommit/client_config.toml")
            .arg(
                Arg::new("base-url")
                    .long("base-url")
                    .short('u')
                    .value_name("URL")
                    .help("Backend url including its api prefix, e.g. http://localhost:5000/api")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("session-cookie")
                    .long("session-cookie")
                    .short('c')
                    .value_name("COOKIE")
                    .help("Session cookie copied from the browser after signing in. Empty clears it.")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("no-commit-fallback")
                    .long("no-commit-fallback")
                    .help("Never fall back to the public GitHub API for commit history")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("commit-fallback")
                    .long("commit-fallback")
                    .help("Fall back to the public GitHub API when the backend cannot list commits")
                    .conflicts_with("no-commit-fallback")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("show")
                    .long("show")
                    .help("Print the current configuration")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg_required_else_help(true)
    }

    async fn run(&self, args: &clap::ArgMatches) -> Result<(), AutoCommitError> {
        let mut config = helpers::get_config()?;
        let mut changed = false;

        if let Some(base_url) = args.get_one::<String>("base-url") {
            self.set_base_url(&mut config, base_url)?;
            changed = true;
        }

        if let Some(cookie) = args.get_one::<String>("session-cookie") {
            config.set_session_cookie(cookie);
            changed = true;
        }

        if args.get_flag("no-commit-fallback") {
            config.commit_history_fallback = false;
            changed = true;
        } else if args.get_flag("commit-fallback") {
            config.commit_history_fallback = true;
            changed = true;
        }

        if changed {
            config.save_default()?;
        }

        if args.get_flag("show") {
            self.show(&config);
        }
        Ok(())
    }
}

impl ConfigCmd {
    fn set_base_url(
        &self,
        config: &mut ClientConfig,
        base_url: &str,
    ) -> Result<(), AutoCommitError> {
        let base_url = base_url.trim();
        url::Url::parse(base_url)?;
        config.base_url = base_url.trim_end_matches('/').to_string();
        Ok(())
    }

    fn show(&self, config: &ClientConfig) {
        println!("base_url: {}", config.base_url);
        let cookie = if config.session_cookie.is_some() {
            "set"
        } else {
            "not set"
        };
        println!("session_cookie: {cookie}");
        println!("github_api_url: {}", config.github_api_url);
        println!("commit_history_fallback: {}", config.commit_history_fallback);
    }
}
