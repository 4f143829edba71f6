use async_trait::async_trait;
use clap::Command;
use colored::Colorize;

use libautocommit::api;
use libautocommit::constants::SESSION_COOKIE_NAME;
use libautocommit::error::AutoCommitError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "login";
pub struct LoginCmd;

#[async_trait]
impl RunCmd for LoginCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME).about("Prints the GitHub sign in url and how to store the session")
    }

    async fn run(&self, _args: &clap::ArgMatches) -> Result<(), AutoCommitError> {
        let config = helpers::get_config()?;
        let url = api::endpoint::login_url(&config);

        println!("Sign in with GitHub by opening:\n\n  {}\n", url.blue());
        println!(
            "Once signed in, copy the `{SESSION_COOKIE_NAME}` cookie from your browser and run:\n\n  autocommit config --session-cookie <COOKIE>\n"
        );
        Ok(())
    }
}
