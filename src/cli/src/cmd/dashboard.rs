use async_trait::async_trait;
use clap::Command;
use colored::Colorize;

use libautocommit::config::ClientConfig;
use libautocommit::core::countdown::{CountdownState, CountdownView};
use libautocommit::core::dashboard::Dashboard;
use libautocommit::core::poller::{self, PollerEvent, RemoteStatusSource};
use libautocommit::core::routes::{Route, RouteDecision};
use libautocommit::error::AutoCommitError;
use libautocommit::model::{AutomationStatus, NextCommit};
use libautocommit::opts::PollOpts;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "dashboard";
pub struct DashboardCmd;

#[async_trait]
impl RunCmd for DashboardCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Shows your repository, its commits and a live countdown to the next one")
    }

    async fn run(&self, _args: &clap::ArgMatches) -> Result<(), AutoCommitError> {
        let config = helpers::get_config()?;
        let (resolver, check) = helpers::resolve_session(&config, Route::Dashboard.path()).await?;
        if let Some(RouteDecision::Redirect(route)) = resolver.decision() {
            log::debug!("dashboard redirected to {}", route.path());
            return Err(AutoCommitError::unauthenticated());
        }

        let mut dashboard =
            Dashboard::for_session(&check).ok_or_else(AutoCommitError::unauthenticated)?;
        println!("Welcome, {}", dashboard.username().bold());

        if let Err(err) = dashboard.load_status(&config).await {
            eprintln!("{}", format!("Could not load automation status: {err}").red());
        }

        let Some(repository) = dashboard.repository() else {
            println!(
                "You have no repository yet. Create one with:\n\n  autocommit create-repo --name <NAME>\n"
            );
            return Ok(());
        };
        helpers::print_repository(repository);
        println!();
        self.print_history(&dashboard, &config).await;

        self.watch(&dashboard, config).await
    }
}

impl DashboardCmd {
    async fn print_history(&self, dashboard: &Dashboard, config: &ClientConfig) {
        match dashboard.commit_history(config).await {
            Ok(history) => helpers::print_commit_history(&history),
            Err(err) => eprintln!("{}", err.to_string().red()),
        }
        println!();
    }

    /// Runs the poller until Ctrl-C
    async fn watch(
        &self,
        dashboard: &Dashboard,
        config: ClientConfig,
    ) -> Result<(), AutoCommitError> {
        let mut handle =
            poller::spawn(RemoteStatusSource::new(config.clone()), PollOpts::default());
        let mut next_commit = dashboard
            .status()
            .map(|status| status.next_commit.clone())
            .unwrap_or_else(NextCommit::none);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            let event = tokio::select! {
                _ = &mut ctrl_c => {
                    println!();
                    break;
                }
                event = handle.next_event() => event,
            };
            let Some(event) = event else {
                break;
            };

            match event {
                PollerEvent::Status { status, state } => {
                    next_commit = status.next_commit.clone();
                    self.print_status(&status, state);
                }
                PollerEvent::Tick(seconds) => {
                    let view = CountdownView::new(CountdownState::Counting(seconds), &next_commit);
                    if !view.is_hidden() {
                        helpers::print_countdown_line(&view)?;
                    }
                }
                PollerEvent::CommitInProgress => {
                    let view = CountdownView::new(CountdownState::Reconciling, &next_commit);
                    if !view.is_hidden() {
                        helpers::print_countdown_line(&view)?;
                    }
                }
                PollerEvent::Rescheduled { status, seconds } => {
                    println!();
                    next_commit = status.next_commit.clone();
                    self.print_status(&status, CountdownState::Counting(seconds));
                    self.print_history(dashboard, &config).await;
                }
                PollerEvent::NoMoreCommits(status) => {
                    println!();
                    next_commit = status.next_commit.clone();
                    println!("{}", CountdownView::NoMoreCommits.to_string().dimmed());
                    self.print_history(dashboard, &config).await;
                }
                PollerEvent::ForcedRefresh => {
                    println!();
                    println!("{}", "Reloading status...".dimmed());
                }
                PollerEvent::FetchFailed(msg) => {
                    println!();
                    eprintln!("{}", format!("Could not load automation status: {msg}").red());
                }
            }
        }

        handle.shutdown().await;
        Ok(())
    }

    fn print_status(&self, status: &AutomationStatus, state: CountdownState) {
        let view = CountdownView::new(state, &status.next_commit);
        helpers::print_status(status, &view);
    }
}
