#[cfg(test)]
#[path = "route_guard_test.rs"]
mod tests;

use crate::domain::models::Route;
use crate::domain::models::Session;

pub struct RouteGuard {}

impl RouteGuard {
    /// Protected routes redirect to the login screen without a session.
    /// Guests count as authenticated.
    pub fn resolve(route: Route, session: &Session) -> Route {
        if !RouteGuard::permits(&route, session) {
            tracing::debug!(route = %route, "Redirecting unauthenticated visit to login");
            return Route::Login;
        }

        return route;
    }

    pub fn permits(route: &Route, session: &Session) -> bool {
        return !route.is_protected() || session.is_authenticated();
    }
}
