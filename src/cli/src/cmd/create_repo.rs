use async_trait::async_trait;
use clap::{Arg, Command};
use colored::Colorize;
use dialoguer::Select;

use libautocommit::config::ClientConfig;
use libautocommit::constants::DEFAULT_REPO_DESCRIPTION;
use libautocommit::core::countdown::{Countdown, CountdownView};
use libautocommit::core::dashboard::Dashboard;
use libautocommit::core::repository_form::RepositoryForm;
use libautocommit::core::session;
use libautocommit::error::{AutoCommitError, FAILED_TO_CREATE_REPOSITORY};

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "create-repo";
pub struct CreateRepoCmd;

#[async_trait]
impl RunCmd for CreateRepoCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Creates the GitHub repository the automated commits go to")
            .arg(
                Arg::new("name")
                    .long("name")
                    .short('n')
                    .help("Name of the repository to create")
                    .required(true)
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("description")
                    .long("description")
                    .short('d')
                    .help("Repository description")
                    .default_value(DEFAULT_REPO_DESCRIPTION)
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("no-input")
                    .long("no-input")
                    .help("Fail on a name conflict instead of offering the suggested names")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    async fn run(&self, args: &clap::ArgMatches) -> Result<(), AutoCommitError> {
        let Some(name) = args.get_one::<String>("name") else {
            return Err(AutoCommitError::invalid_repository_name(""));
        };
        let interactive = !args.get_flag("no-input");

        let config = helpers::get_config()?;
        let check = session::check(&config).await;
        let mut dashboard =
            Dashboard::for_session(&check).ok_or_else(AutoCommitError::unauthenticated)?;

        let mut form = RepositoryForm::with_name(name);
        if let Some(description) = args.get_one::<String>("description") {
            form.description = description.to_owned();
        }

        loop {
            println!("Creating repository {}...", form.repo_name.bold());
            if let Some(repository) = form.submit(&config).await {
                println!("{}", "Repository created".green());
                helpers::print_repository(&repository);
                dashboard.repository_created(repository);
                self.refresh_status(&mut dashboard, &config).await;
                return Ok(());
            }

            let error = form
                .error()
                .unwrap_or(FAILED_TO_CREATE_REPOSITORY)
                .to_string();
            if form.suggested_names().is_empty() || !interactive {
                return Err(AutoCommitError::basic_str(error));
            }

            eprintln!("{}", error.yellow());
            let choice = match Select::new()
                .with_prompt("Try one of these names instead")
                .items(form.suggested_names())
                .default(0)
                .interact_opt()
            {
                Ok(choice) => choice,
                Err(e) => {
                    return Err(AutoCommitError::basic_str(format!(
                        "Error choosing a name: {e}"
                    )));
                }
            };

            match choice {
                Some(index) => {
                    let name = form.suggested_names()[index].to_owned();
                    form.select_suggestion(name);
                }
                None => return Err(AutoCommitError::basic_str(error)),
            }
        }
    }
}

impl CreateRepoCmd {
    /// The new repository changes the schedule, show the status the backend reports now
    async fn refresh_status(&self, dashboard: &mut Dashboard, config: &ClientConfig) {
        if !dashboard.needs_status_refresh() {
            return;
        }
        if let Err(err) = dashboard.load_status(config).await {
            eprintln!("{}", format!("Could not load automation status: {err}").red());
            return;
        }
        if let Some(status) = dashboard.status() {
            let state = Countdown::new().enter(status);
            println!();
            helpers::print_status(status, &CountdownView::new(state, &status.next_commit));
        }
    }
}
