use crate::api;
use crate::config::ClientConfig;
use crate::constants::DEFAULT_REPO_DESCRIPTION;
use crate::error::AutoCommitError;
use crate::model::{Repository, RepositoryNew};

/// State behind the "create repository" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryForm {
    pub repo_name: String,
    pub description: String,
    loading: bool,
    error: Option<String>,
    suggested_names: Vec<String>,
}

impl Default for RepositoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryForm {
    pub fn new() -> RepositoryForm {
        RepositoryForm {
            repo_name: String::new(),
            description: String::from(DEFAULT_REPO_DESCRIPTION),
            loading: false,
            error: None,
            suggested_names: vec![],
        }
    }

    pub fn with_name(repo_name: impl AsRef<str>) -> RepositoryForm {
        RepositoryForm {
            repo_name: String::from(repo_name.as_ref()),
            ..RepositoryForm::new()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn suggested_names(&self) -> &[String] {
        &self.suggested_names
    }

    /// Clears the previous error and suggestions and builds the request body
    pub fn begin_submit(&mut self) -> Result<RepositoryNew, AutoCommitError> {
        self.error = None;
        self.suggested_names.clear();

        let repo = RepositoryNew::new(&self.repo_name).with_description(&self.description);
        if let Err(err) = repo.validate() {
            self.error = Some(err.user_message());
            return Err(err);
        }
        self.loading = true;
        Ok(repo)
    }

    /// Records how the creation call went. Returns the repository on success.
    pub fn finish_submit(
        &mut self,
        result: Result<Repository, AutoCommitError>,
    ) -> Option<Repository> {
        self.loading = false;
        match result {
            Ok(repository) => Some(repository),
            Err(AutoCommitError::NameConflict(conflict)) => {
                let conflict = *conflict;
                log::debug!(
                    "repository name taken, {} suggestions",
                    conflict.suggested_names.len()
                );
                self.error = Some(conflict.error);
                self.suggested_names = conflict.suggested_names;
                None
            }
            Err(err) => {
                log::error!("failed to create repository: {err}");
                self.error = Some(err.user_message());
                None
            }
        }
    }

    pub async fn submit(&mut self, config: &ClientConfig) -> Option<Repository> {
        let repo = self.begin_submit().ok()?;
        let result = api::client::repositories::create(config, &repo).await;
        self.finish_submit(result)
    }

    /// Puts a suggested name in the name field and hides the suggestions
    pub fn select_suggestion(&mut self, name: impl AsRef<str>) {
        self.repo_name = String::from(name.as_ref());
        self.suggested_names.clear();
    }
}
