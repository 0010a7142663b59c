#[cfg(test)]
#[path = "route_test.rs"]
mod tests;

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Register,
    Login,
    Dashboard,
    Chat(Option<String>),
    Analyzer,
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments = trimmed
            .split('/')
            .filter(|segment| return !segment.is_empty())
            .collect::<Vec<&str>>();

        match segments.as_slice() {
            [] => return Some(Route::Home),
            ["register"] => return Some(Route::Register),
            ["login"] => return Some(Route::Login),
            ["dashboard"] => return Some(Route::Dashboard),
            ["analyzer"] => return Some(Route::Analyzer),
            ["chat"] => return Some(Route::Chat(None)),
            ["chat", id] => return Some(Route::Chat(Some(id.to_string()))),
            _ => return None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => return "/".to_string(),
            Route::Register => return "/register".to_string(),
            Route::Login => return "/login".to_string(),
            Route::Dashboard => return "/dashboard".to_string(),
            Route::Analyzer => return "/analyzer".to_string(),
            Route::Chat(None) => return "/chat".to_string(),
            Route::Chat(Some(id)) => return format!("/chat/{id}"),
        }
    }

    pub fn is_protected(&self) -> bool {
        return matches!(self, Route::Dashboard | Route::Chat(_) | Route::Analyzer);
    }

    /// Routes that render the same screen share a title, so `/chat` and
    /// `/chat/:id` both read as "Chat".
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => return "Home",
            Route::Register => return "Register",
            Route::Login => return "Login",
            Route::Dashboard => return "Dashboard",
            Route::Chat(_) => return "Chat",
            Route::Analyzer => return "Analyzer",
        }
    }

    pub fn same_screen(&self, other: &Route) -> bool {
        return self.title() == other.title();
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.path());
    }
}
