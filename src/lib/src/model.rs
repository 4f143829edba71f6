//! Values exchanged with the automation backend
//!

pub mod automation_status;
pub mod commit_history;
pub mod commit_record;
pub mod repository;
pub mod server_status;
pub mod session;

pub use crate::model::automation_status::{AutomationStatus, NextCommit};
pub use crate::model::commit_history::{CommitHistory, CommitSource, FallbackReason};
pub use crate::model::commit_record::{CommitId, CommitRecord};
pub use crate::model::repository::{NameConflict, Repository, RepositoryNew};
pub use crate::model::server_status::ServerStatus;
pub use crate::model::session::Session;
