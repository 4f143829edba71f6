//! Resolves who is signed in before anything is shown
//!
//! Every failure to ask the backend, whatever its cause, is treated as
//! "not signed in". That decision lives here and nowhere else.

use crate::api;
use crate::config::ClientConfig;
use crate::core::routes::{self, RouteDecision};
use crate::error::AutoCommitError;
use crate::model::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    Authenticated(Session),
    Anonymous,
}

impl SessionCheck {
    pub fn from_session(session: Session) -> SessionCheck {
        if session.authenticated {
            SessionCheck::Authenticated(session)
        } else {
            SessionCheck::Anonymous
        }
    }

    pub fn from_result(result: Result<Session, AutoCommitError>) -> SessionCheck {
        match result {
            Ok(session) => SessionCheck::from_session(session),
            Err(err) => {
                log::debug!("session check failed, treating as anonymous: {err}");
                SessionCheck::Anonymous
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionCheck::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionCheck::Authenticated(session) => Some(session),
            SessionCheck::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.session().and_then(|session| session.username.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No check has been started yet
    Unchecked,
    /// A check is outstanding, render nothing
    Pending,
    Resolved(SessionCheck),
}

/// Identifies one navigation's session check. Only the newest ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTicket {
    generation: u64,
    path: String,
}

impl SessionTicket {
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, Clone)]
pub struct SessionResolver {
    generation: u64,
    path: Option<String>,
    resolution: Resolution,
}

impl Default for SessionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionResolver {
    pub fn new() -> SessionResolver {
        SessionResolver {
            generation: 0,
            path: None,
            resolution: Resolution::Unchecked,
        }
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Starts a check for `path`, superseding any check still in flight
    pub fn navigate(&mut self, path: impl AsRef<str>) -> SessionTicket {
        self.generation += 1;
        let path = String::from(path.as_ref());
        self.path = Some(path.clone());
        self.resolution = Resolution::Pending;
        SessionTicket {
            generation: self.generation,
            path,
        }
    }

    /// Returns false when the ticket belongs to an older navigation and was dropped
    pub fn apply(
        &mut self,
        ticket: SessionTicket,
        result: Result<Session, AutoCommitError>,
    ) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "dropping session check for {} (generation {} != {})",
                ticket.path,
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.resolution = Resolution::Resolved(SessionCheck::from_result(result));
        true
    }

    /// Route decision for the current path, once the check has resolved
    pub fn decision(&self) -> Option<RouteDecision> {
        match (&self.resolution, &self.path) {
            (Resolution::Resolved(check), Some(path)) => Some(routes::gate(path, check)),
            _ => None,
        }
    }

    /// Navigates to `path` and waits for the backend's answer
    pub async fn resolve(&mut self, config: &ClientConfig, path: impl AsRef<str>) -> &Resolution {
        let ticket = self.navigate(path);
        let result = api::client::session::get_user(config).await;
        self.apply(ticket, result);
        &self.resolution
    }
}

/// One-off check outside of any navigation
pub async fn check(config: &ClientConfig) -> SessionCheck {
    SessionCheck::from_result(api::client::session::get_user(config).await)
}
