#[cfg(test)]
#[path = "menu_test.rs"]
mod tests;

use ratatui::prelude::Alignment;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

use super::NavTarget;
use crate::domain::models::Route;

pub struct MenuItem {
    pub label: &'static str,
    pub description: &'static str,
    pub target: NavTarget,
}

/// Card style choices for the home and dashboard screens.
pub struct Menu {
    heading: &'static str,
    intro: &'static str,
    pub items: Vec<MenuItem>,
    selected: usize,
}

impl Menu {
    pub fn home() -> Menu {
        return Menu {
            heading: "Your AI Career Coach",
            intro: "Get personalized career advice, practice interviews, and see how well your resume matches the job you want.",
            items: vec![
                MenuItem {
                    label: "Get Started",
                    description: "Create a free account.",
                    target: NavTarget::Go(Route::Register),
                },
                MenuItem {
                    label: "Sign In",
                    description: "Pick up where you left off.",
                    target: NavTarget::Go(Route::Login),
                },
            ],
            selected: 0,
        };
    }

    pub fn dashboard() -> Menu {
        return Menu {
            heading: "Dashboard",
            intro: "What would you like to work on today?",
            items: vec![
                MenuItem {
                    label: "AI Career Coach",
                    description: "Chat about interviews, career moves and salary negotiation.",
                    target: NavTarget::Go(Route::Chat(None)),
                },
                MenuItem {
                    label: "Resume Analyzer",
                    description: "Score your resume against a job description.",
                    target: NavTarget::Go(Route::Analyzer),
                },
                MenuItem {
                    label: "Logout",
                    description: "Sign out of this device.",
                    target: NavTarget::Logout,
                },
            ],
            selected: 0,
        };
    }

    pub fn selected(&self) -> usize {
        return self.selected;
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        self.selected = (self.selected + self.items.len() - 1) % self.items.len();
    }

    pub fn selected_target(&self) -> Option<NavTarget> {
        return self.items.get(self.selected).map(|item| return item.target.clone());
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect) {
        let mut constraints = vec![Constraint::Length(4)];
        constraints.extend(self.items.iter().map(|_| return Constraint::Length(4)));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(rect);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    self.heading,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(self.intro),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
            rows[0],
        );

        for (idx, item) in self.items.iter().enumerate() {
            let mut border_style = Style::default();
            if idx == self.selected {
                border_style = border_style.fg(Color::Cyan);
            }

            frame.render_widget(
                Paragraph::new(item.description)
                    .block(
                        Block::default()
                            .title(item.label)
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded)
                            .border_style(border_style),
                    )
                    .wrap(Wrap { trim: true }),
                rows[idx + 1],
            );
        }
    }
}
