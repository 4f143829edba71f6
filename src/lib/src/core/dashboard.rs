//! The signed-in landing screen: repository, automation status and commit history

use crate::api;
use crate::config::ClientConfig;
use crate::core::session::SessionCheck;
use crate::error::AutoCommitError;
use crate::model::{AutomationStatus, CommitHistory, Repository, Session};

#[derive(Debug, Clone)]
pub struct Dashboard {
    session: Session,
    repository: Option<Repository>,
    status: Option<AutomationStatus>,
    status_stale: bool,
}

impl Dashboard {
    /// `None` for anonymous sessions, the dashboard is never built for them
    pub fn for_session(check: &SessionCheck) -> Option<Dashboard> {
        let session = check.session()?.clone();
        let repository = match (session.username.as_deref(), session.repository_name()) {
            (Some(owner), Some(name)) => Some(Repository::for_owner(owner, name)),
            _ => None,
        };
        Some(Dashboard {
            session,
            repository,
            status: None,
            status_stale: true,
        })
    }

    pub fn username(&self) -> &str {
        self.session.username.as_deref().unwrap_or_default()
    }

    pub fn repository(&self) -> Option<&Repository> {
        self.repository.as_ref()
    }

    pub fn status(&self) -> Option<&AutomationStatus> {
        self.status.as_ref()
    }

    /// The creation form is shown until a repository is known
    pub fn needs_repository(&self) -> bool {
        self.repository.is_none()
    }

    pub fn needs_status_refresh(&self) -> bool {
        self.status_stale
    }

    /// Takes a freshly fetched status, filling in the repository if the session had none
    pub fn apply_status(&mut self, status: AutomationStatus) {
        if self.repository.is_none() {
            let owner = self.session.username.as_deref();
            if let (Some(owner), Some(name)) = (owner, status.repo_name()) {
                log::debug!("dashboard repository from status: {owner}/{name}");
                self.repository = Some(Repository::for_owner(owner, name));
            }
        }
        self.status = Some(status);
        self.status_stale = false;
    }

    pub fn repository_created(&mut self, repository: Repository) {
        log::debug!("dashboard repository created: {}", repository.html_url);
        self.repository = Some(repository);
        self.status_stale = true;
    }

    pub async fn load_status(&mut self, config: &ClientConfig) -> Result<(), AutoCommitError> {
        let status = api::client::status::get(config).await?;
        self.apply_status(status);
        Ok(())
    }

    pub async fn commit_history(
        &self,
        config: &ClientConfig,
    ) -> Result<CommitHistory, AutoCommitError> {
        let repo_name = self.repository.as_ref().map(|repo| repo.name.as_str());
        let owner = self.session.username.as_deref();
        api::client::commits::list_with_fallback(config, owner, repo_name).await
    }
}

#[cfg(test)]
mod tests {
    use crate::core::dashboard::Dashboard;
    use crate::core::session::SessionCheck;
    use crate::error::AutoCommitError;
    use crate::model::{AutomationStatus, CommitSource, Repository, Session};
    use crate::test;

    fn session(repository_name: Option<&str>) -> SessionCheck {
        SessionCheck::Authenticated(Session {
            authenticated: true,
            username: Some(String::from("octocat")),
            has_repository: Some(repository_name.is_some()),
            repository_name: repository_name.map(String::from),
        })
    }

    #[test]
    fn test_no_dashboard_for_anonymous() {
        assert!(Dashboard::for_session(&SessionCheck::Anonymous).is_none());
    }

    #[test]
    fn test_repository_from_session() {
        let dashboard = Dashboard::for_session(&session(Some("daily-streak"))).unwrap();
        assert_eq!(dashboard.username(), "octocat");
        assert_eq!(
            dashboard.repository().unwrap().html_url,
            "https://github.com/octocat/daily-streak"
        );
        assert!(!dashboard.needs_repository());
        assert!(dashboard.needs_status_refresh());
    }

    #[test]
    fn test_repository_from_status_when_session_has_none() {
        let mut dashboard = Dashboard::for_session(&session(None)).unwrap();
        assert!(dashboard.needs_repository());

        dashboard.apply_status(test::scheduled_status(60));
        assert_eq!(dashboard.repository().unwrap().name, "daily-streak");
        assert!(!dashboard.needs_status_refresh());
    }

    #[test]
    fn test_session_repository_wins_over_status() {
        let mut dashboard = Dashboard::for_session(&session(Some("from-session"))).unwrap();
        dashboard.apply_status(test::scheduled_status(60));
        assert_eq!(dashboard.repository().unwrap().name, "from-session");
    }

    #[test]
    fn test_inactive_status_leaves_repository_empty() {
        let mut dashboard = Dashboard::for_session(&session(None)).unwrap();
        dashboard.apply_status(AutomationStatus::inactive());
        assert!(dashboard.needs_repository());
    }

    #[test]
    fn test_repository_created_requests_refresh() {
        let mut dashboard = Dashboard::for_session(&session(None)).unwrap();
        dashboard.apply_status(AutomationStatus::inactive());
        assert!(!dashboard.needs_status_refresh());

        dashboard.repository_created(Repository::for_owner("octocat", "new-repo"));
        assert_eq!(dashboard.repository().unwrap().name, "new-repo");
        assert!(dashboard.needs_status_refresh());
    }

    #[tokio::test]
    async fn test_load_status_and_history() -> Result<(), AutoCommitError> {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());

        let status_mock = server
            .mock("GET", "/api/github/status")
            .with_status(200)
            .with_body(test::SCHEDULED_STATUS_BODY)
            .create_async()
            .await;
        let commits_mock = server
            .mock("GET", "/api/commits")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let mut dashboard = Dashboard::for_session(&session(None)).unwrap();
        dashboard.load_status(&config).await?;
        assert_eq!(dashboard.repository().unwrap().name, "daily-streak");

        let history = dashboard.commit_history(&config).await?;
        assert_eq!(history.source, CommitSource::Backend);
        assert!(history.is_empty());

        status_mock.assert_async().await;
        commits_mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_history_without_repository() {
        let mut server = mockito::Server::new_async().await;
        let config = test::config_for(&server.url());
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let dashboard = Dashboard::for_session(&session(None)).unwrap();
        let result = dashboard.commit_history(&config).await;
        assert!(matches!(
            result,
            Err(AutoCommitError::RepositoryInfoMissing(_))
        ));
        mock.assert_async().await;
    }
}
