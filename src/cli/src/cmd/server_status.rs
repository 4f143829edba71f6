use async_trait::async_trait;
use clap::Command;
use colored::Colorize;

use libautocommit::api;
use libautocommit::error::AutoCommitError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "server-status";
pub struct ServerStatusCmd;

#[async_trait]
impl RunCmd for ServerStatusCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME).about("Checks whether the backend is reachable")
    }

    async fn run(&self, _args: &clap::ArgMatches) -> Result<(), AutoCommitError> {
        let config = helpers::get_config()?;
        let status = api::client::health::check(&config).await;

        let label = if status.available {
            "online".green()
        } else {
            "offline".red()
        };
        println!("{} {} ({})", "Server:".bold(), label, config.base_url);
        println!("{}", status.message);
        println!("Response time: {}ms", status.response_time.as_millis());
        if let Some(timestamp) = &status.timestamp {
            println!("Server time: {timestamp}");
        }

        if status.available {
            Ok(())
        } else {
            Err(AutoCommitError::basic_str("Server unavailable"))
        }
    }
}
