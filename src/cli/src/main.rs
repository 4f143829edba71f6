use std::collections::HashMap;
use std::process::ExitCode;

use clap::Command;

pub mod cmd;
pub mod helpers;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine, it only overrides the configured backend url
    if let Err(err) = dotenv::dotenv() {
        log::trace!("no .env loaded: {err}");
    }
    libautocommit::util::logging::init_logging();

    let cmds: Vec<Box<dyn cmd::RunCmd>> = vec![
        Box::new(cmd::CommitsCmd),
        Box::new(cmd::ConfigCmd),
        Box::new(cmd::CreateRepoCmd),
        Box::new(cmd::DashboardCmd),
        Box::new(cmd::LoginCmd),
        Box::new(cmd::LogoutCmd),
        Box::new(cmd::ServerStatusCmd),
        Box::new(cmd::StatusCmd),
        Box::new(cmd::WhoamiCmd),
    ];

    let mut command = Command::new("autocommit")
        .version(libautocommit::constants::AUTOCOMMIT_VERSION)
        .about("Keep your GitHub contribution graph green with automated daily commits")
        .subcommand_required(true)
        .arg_required_else_help(true);

    let mut runners: HashMap<String, Box<dyn cmd::RunCmd>> = HashMap::new();
    for cmd in cmds {
        command = command.subcommand(cmd.args());
        runners.insert(cmd.name().to_string(), cmd);
    }

    let matches = command.get_matches();
    match matches.subcommand() {
        Some((command, args)) => {
            if let Some(runner) = runners.get(command) {
                match runner.run(args).await {
                    Ok(_) => {}
                    Err(err) => {
                        eprintln!("{err}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                eprintln!("Unknown command `autocommit {command}`");
                return ExitCode::FAILURE;
            }
        }
        _ => unreachable!(), // subcommand_required
    }

    ExitCode::SUCCESS
}
