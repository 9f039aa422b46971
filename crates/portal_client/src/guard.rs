//! Portal routes and the role-gated route guard

use std::fmt;

use core_kernel::ClientId;
use domain_case::Role;

use crate::session::SessionState;

/// Every page of the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Success,
    Login,
    Unauthorized,
    ClientDashboard,
    AdminDashboard,
    AdminCase(ClientId),
}

impl Route {
    /// Resolves a path; anything unrecognised lands on `/`
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Landing,
            ["success"] => Route::Success,
            ["login"] => Route::Login,
            ["unauthorized"] => Route::Unauthorized,
            ["client", "dashboard"] => Route::ClientDashboard,
            ["admin", "dashboard"] => Route::AdminDashboard,
            ["admin", "clients", id] => id
                .parse::<ClientId>()
                .map(Route::AdminCase)
                .unwrap_or(Route::Landing),
            _ => Route::Landing,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Success => "/success".to_string(),
            Route::Login => "/login".to_string(),
            Route::Unauthorized => "/unauthorized".to_string(),
            Route::ClientDashboard => "/client/dashboard".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::AdminCase(id) => format!("/admin/clients/{}", id.as_uuid()),
        }
    }

    /// Role needed to render the route; `None` for public pages
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Landing | Route::Success | Route::Login | Route::Unauthorized => None,
            Route::ClientDashboard => Some(Role::Client),
            Route::AdminDashboard | Route::AdminCase(_) => Some(Role::Admin),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What the shell should do with a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still hydrating; show a spinner
    Loading,
    Render(Route),
    Redirect(Route),
}

/// Decides whether `route` may be shown for the current session
pub fn guard(route: Route, state: &SessionState) -> RouteDecision {
    let Some(required) = route.required_role() else {
        return RouteDecision::Render(route);
    };

    match state {
        SessionState::Loading => RouteDecision::Loading,
        SessionState::Anonymous => RouteDecision::Redirect(Route::Login),
        SessionState::Authenticated(session) if session.role != required => {
            RouteDecision::Redirect(Route::Unauthorized)
        }
        SessionState::Authenticated(_) => RouteDecision::Render(route),
    }
}

/// Landing page after login
pub fn home_for(role: Role) -> Route {
    match role {
        Role::Client => Route::ClientDashboard,
        Role::Admin => Route::AdminDashboard,
    }
}
