use async_trait::async_trait;
use clap::Command;

use libautocommit::api;
use libautocommit::core::countdown::{Countdown, CountdownView};
use libautocommit::error::AutoCommitError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "status";
pub struct StatusCmd;

#[async_trait]
impl RunCmd for StatusCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME).about("Shows the automation status and the next scheduled commit")
    }

    async fn run(&self, _args: &clap::ArgMatches) -> Result<(), AutoCommitError> {
        let config = helpers::get_config()?;
        let status = api::client::status::get(&config).await?;

        let mut countdown = Countdown::new();
        let state = countdown.enter(&status);
        let view = CountdownView::new(state, &status.next_commit);

        match status.repo_name() {
            Some(name) => println!("Repository: {name}"),
            None => println!("No repository yet"),
        }
        helpers::print_status(&status, &view);
        Ok(())
    }
}
