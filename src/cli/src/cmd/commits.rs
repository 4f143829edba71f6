use async_trait::async_trait;
use clap::{Arg, Command};

use libautocommit::core::dashboard::Dashboard;
use libautocommit::core::routes::Route;
use libautocommit::error::AutoCommitError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "commits";
pub struct CommitsCmd;

#[async_trait]
impl RunCmd for CommitsCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Lists the commits made in your repository")
            .arg(
                Arg::new("no-fallback")
                    .long("no-fallback")
                    .help("Do not fall back to the public GitHub API when the backend cannot list commits")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    async fn run(&self, args: &clap::ArgMatches) -> Result<(), AutoCommitError> {
        let mut config = helpers::get_config()?;
        if args.get_flag("no-fallback") {
            config.commit_history_fallback = false;
        }

        let (_, check) = helpers::resolve_session(&config, Route::Dashboard.path()).await?;
        let mut dashboard =
            Dashboard::for_session(&check).ok_or_else(AutoCommitError::unauthenticated)?;
        if dashboard.needs_repository() {
            if let Err(err) = dashboard.load_status(&config).await {
                log::debug!("could not load status for repository name: {err}");
            }
        }

        let history = dashboard.commit_history(&config).await?;
        helpers::print_commit_history(&history);
        Ok(())
    }
}
