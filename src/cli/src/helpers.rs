use colored::Colorize;
use std::io::Write;

use libautocommit::config::ClientConfig;
use libautocommit::core::countdown::CountdownView;
use libautocommit::core::session::{Resolution, SessionCheck, SessionResolver};
use libautocommit::error::AutoCommitError;
use libautocommit::model::{AutomationStatus, CommitHistory, CommitSource, Repository};

pub fn get_config() -> Result<ClientConfig, AutoCommitError> {
    ClientConfig::get_or_create()
}

/// Checks the session for `path`, showing a placeholder line while the check is out
pub async fn resolve_session(
    config: &ClientConfig,
    path: &str,
) -> Result<(SessionResolver, SessionCheck), AutoCommitError> {
    let mut resolver = SessionResolver::new();
    eprint!("{}", "Checking session...".dimmed());
    std::io::stderr().flush()?;
    let resolution = resolver.resolve(config, path).await.clone();
    eprint!("\r{}\r", " ".repeat(20));

    match resolution {
        Resolution::Resolved(check) => Ok((resolver, check)),
        Resolution::Unchecked | Resolution::Pending => Err(AutoCommitError::basic_str(
            "Session check did not complete",
        )),
    }
}

pub fn print_repository(repository: &Repository) {
    println!("{} {}", "Repository:".bold(), repository.name);
    println!("{} {}", "View on GitHub:".bold(), repository.html_url.blue());
}

pub fn print_status(status: &AutomationStatus, view: &CountdownView) {
    let active = if status.active {
        "active".green()
    } else {
        "inactive".yellow()
    };
    println!("{} {}", "Automation:".bold(), active);
    println!(
        "{} {}",
        "Today's Scheduled Commits:".bold(),
        status.scheduled_commits
    );
    println!("{} {}", "Total Commits:".bold(), status.total_commits);

    let next = &status.next_commit;
    if next.has_scheduled_commits {
        if let Some(time) = &next.formatted_time {
            println!("{} {}", "Next Commit:".bold(), time);
        }
        if !view.is_hidden() {
            println!("{} {}", "Countdown:".bold(), view.to_string().cyan());
        }
    } else {
        println!("{}", "No commits scheduled yet".dimmed());
    }
}

/// Rewrites the current line, for the ticking countdown
pub fn print_countdown_line(view: &CountdownView) -> Result<(), AutoCommitError> {
    print!("\r{} {}   ", "Countdown:".bold(), view.to_string().cyan());
    std::io::stdout().flush()?;
    Ok(())
}

pub fn commits_table(history: &CommitHistory) -> comfy_table::Table {
    let mut table = comfy_table::Table::new();
    table.set_header(vec!["sha", "message", "date", "url"]);
    for commit in history.commits.iter() {
        let date = commit
            .local_timestamp()
            .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| commit.timestamp.to_owned());
        table.add_row(vec![
            commit.short_sha().to_string(),
            commit.summary().to_string(),
            date,
            commit.commit_url.to_owned(),
        ]);
    }
    table
}

pub fn print_commit_history(history: &CommitHistory) {
    println!("{}", "Commit History".bold());
    if let (CommitSource::GitHubPublic, Some(reason)) = (history.source, &history.fallback_reason)
    {
        println!(
            "{}",
            format!("Showing commits from the public GitHub API ({reason})").yellow()
        );
    }
    if history.is_empty() {
        println!("No commits yet");
    } else {
        println!("{}", commits_table(history));
    }
}
