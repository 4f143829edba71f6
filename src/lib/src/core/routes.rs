//! Which screen a path maps to and who may see it
//!

use crate::core::session::SessionCheck;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Signup,
    Dashboard,
    PrivacyPolicy,
    TermsOfUse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Signed in users are sent to the dashboard instead
    GuestOnly,
    /// Anonymous users are sent to the login page instead
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    Redirect(Route),
    NotFound,
}

const ROUTES: [(&str, Route); 6] = [
    ("/", Route::Landing),
    ("/login", Route::Login),
    ("/signup", Route::Signup),
    ("/dashboard", Route::Dashboard),
    ("/privacy", Route::PrivacyPolicy),
    ("/terms", Route::TermsOfUse),
];

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
            Route::PrivacyPolicy => "/privacy",
            Route::TermsOfUse => "/terms",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Login | Route::Signup => Access::GuestOnly,
            Route::Dashboard => Access::Protected,
            Route::Landing | Route::PrivacyPolicy | Route::TermsOfUse => Access::Public,
        }
    }

    /// Query strings, fragments and a trailing slash are ignored
    pub fn from_path(path: impl AsRef<str>) -> Option<Route> {
        let path = path.as_ref();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        ROUTES
            .iter()
            .find(|(route_path, _)| *route_path == path)
            .map(|(_, route)| *route)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

pub fn gate(path: impl AsRef<str>, check: &SessionCheck) -> RouteDecision {
    let Some(route) = Route::from_path(path) else {
        return RouteDecision::NotFound;
    };

    match (route.access(), check.is_authenticated()) {
        (Access::GuestOnly, true) => RouteDecision::Redirect(Route::Dashboard),
        (Access::Protected, false) => RouteDecision::Redirect(Route::Login),
        _ => RouteDecision::Render(route),
    }
}
