#[cfg(test)]
#[path = "navbar_test.rs"]
mod tests;

use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Tabs;
use ratatui::Frame;

use crate::domain::models::Route;
use crate::domain::models::Session;

pub const BRAND: &str = "Career Agent AI";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavTarget {
    Go(Route),
    Logout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: NavTarget,
}

impl NavLink {
    fn go(label: &'static str, route: Route) -> NavLink {
        return NavLink {
            label,
            target: NavTarget::Go(route),
        };
    }
}

pub struct Navbar {}

impl Navbar {
    /// Links in display order, brand first. The link at index `n` is bound to
    /// function key `n + 1`.
    pub fn links(session: &Session) -> Vec<NavLink> {
        let mut links = vec![NavLink::go(BRAND, Route::Home)];

        if session.is_authenticated() {
            links.push(NavLink::go("Dashboard", Route::Dashboard));
            links.push(NavLink::go("Chat", Route::Chat(None)));
            links.push(NavLink::go("Analyzer", Route::Analyzer));
            links.push(NavLink {
                label: "Logout",
                target: NavTarget::Logout,
            });
        } else {
            links.push(NavLink::go("Login", Route::Login));
            links.push(NavLink::go("Register", Route::Register));
        }

        return links;
    }

    pub fn link_for_key(session: &Session, function_key: u8) -> Option<NavLink> {
        if function_key == 0 {
            return None;
        }

        return Navbar::links(session)
            .into_iter()
            .nth((function_key - 1) as usize);
    }

    fn selected_index(links: &[NavLink], route: &Route) -> Option<usize> {
        return links.iter().position(|link| {
            if let NavTarget::Go(target) = &link.target {
                return target.same_screen(route);
            }
            return false;
        });
    }

    pub fn render(frame: &mut Frame, rect: Rect, session: &Session, route: &Route) {
        let links = Navbar::links(session);
        let titles = links
            .iter()
            .enumerate()
            .map(|(idx, link)| {
                return Line::from(format!("F{} {}", idx + 1, link.label));
            })
            .collect::<Vec<Line>>();

        let mut tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );

        if let Some(idx) = Navbar::selected_index(&links, route) {
            tabs = tabs.select(idx);
        }

        frame.render_widget(tabs, rect);
    }
}
