use async_trait::async_trait;
use clap::Command;

use libautocommit::api;
use libautocommit::error::AutoCommitError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "logout";
pub struct LogoutCmd;

#[async_trait]
impl RunCmd for LogoutCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME).about("Ends the session on the backend and forgets the stored cookie")
    }

    async fn run(&self, _args: &clap::ArgMatches) -> Result<(), AutoCommitError> {
        let mut config = helpers::get_config()?;
        if config.session_cookie.is_none() {
            println!("Not signed in");
            return Ok(());
        }

        if let Err(err) = api::client::session::logout(&config).await {
            // Forget the cookie either way, it is useless once we asked to drop it
            eprintln!("{err}");
        }
        config.clear_session_cookie();
        config.save_default()?;
        println!("Signed out");
        Ok(())
    }
}
