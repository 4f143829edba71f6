use async_trait::async_trait;
use clap::{Arg, Command};
use colored::Colorize;

use libautocommit::core::routes::{Route, RouteDecision};
use libautocommit::core::session::SessionCheck;
use libautocommit::error::AutoCommitError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "whoami";
pub struct WhoamiCmd;

#[async_trait]
impl RunCmd for WhoamiCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Shows who is signed in and where a path would take them")
            .arg(
                Arg::new("path")
                    .long("path")
                    .short('p')
                    .help("Page path to check access for")
                    .default_value(Route::Landing.path())
                    .action(clap::ArgAction::Set),
            )
    }

    async fn run(&self, args: &clap::ArgMatches) -> Result<(), AutoCommitError> {
        let path = args
            .get_one::<String>("path")
            .map(String::as_str)
            .unwrap_or(Route::Landing.path());
        let config = helpers::get_config()?;
        let (resolver, check) = helpers::resolve_session(&config, path).await?;

        match &check {
            SessionCheck::Authenticated(session) => {
                let username = session.username.as_deref().unwrap_or("unknown");
                println!("Signed in as {}", username.green());
                match session.repository_name() {
                    Some(name) => println!("Repository: {name}"),
                    None => println!("No repository yet"),
                }
            }
            SessionCheck::Anonymous => println!("{}", "Not signed in".yellow()),
        }

        match resolver.decision() {
            Some(RouteDecision::Render(route)) => println!("{path} renders {route:?}"),
            Some(RouteDecision::Redirect(route)) => {
                println!("{path} redirects to {}", route.path())
            }
            Some(RouteDecision::NotFound) => println!("{path} is not a page"),
            None => {}
        }
        Ok(())
    }
}
