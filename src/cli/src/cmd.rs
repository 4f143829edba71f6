use clap;
use libautocommit::error::AutoCommitError;

use async_trait::async_trait;

pub mod commits;
pub use commits::CommitsCmd;

pub mod config;
pub use config::ConfigCmd;

pub mod create_repo;
pub use create_repo::CreateRepoCmd;

pub mod dashboard;
pub use dashboard::DashboardCmd;

pub mod login;
pub use login::LoginCmd;

pub mod logout;
pub use logout::LogoutCmd;

pub mod server_status;
pub use server_status::ServerStatusCmd;

pub mod status;
pub use status::StatusCmd;

pub mod whoami;
pub use whoami::WhoamiCmd;

#[async_trait]
pub trait RunCmd {
    fn name(&self) -> &str;
    fn args(&self) -> clap::Command;
    async fn run(&self, args: &clap::ArgMatches) -> Result<(), AutoCommitError>;
}
