//! Wire shapes of backend and GitHub responses that are not part of the model
//!

pub mod error_response;
pub mod github;
pub mod health;
pub mod repository;
pub mod success_message;

pub use crate::view::error_response::ErrorResponse;
pub use crate::view::github::{GitHubCommitAuthor, GitHubCommitDetail, GitHubCommitView};
pub use crate::view::health::HealthResponse;
pub use crate::view::repository::{RepositoryConflictResponse, RepositoryCreationResponse};
pub use crate::view::success_message::SuccessMessage;
