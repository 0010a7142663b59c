#[cfg(test)]
#[path = "sidebar_test.rs"]
mod tests;

use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::Frame;

use crate::domain::models::Action;
use crate::domain::models::ConversationSummary;
use crate::domain::models::Loading;
use crate::domain::models::Route;
use crate::domain::models::Session;

pub const NEW_CHAT_LABEL: &str = "+ New Chat";

/// Conversation list next to the chat. Entry 0 is always "New Chat", the
/// rest map onto `conversations`. Only the result of the latest refresh is
/// applied.
#[derive(Default)]
pub struct Sidebar {
    pub conversations: Vec<ConversationSummary>,
    loading: bool,
    cursor: usize,
    ticket: u64,
}

impl Sidebar {
    pub fn is_loading(&self) -> bool {
        return self.loading;
    }

    pub fn cursor(&self) -> usize {
        return self.cursor;
    }

    pub fn ticket(&self) -> u64 {
        return self.ticket;
    }

    pub fn refresh(&mut self, session: &Session) -> Option<Action> {
        let token = session.token()?;
        self.ticket += 1;
        self.loading = true;

        return Some(Action::ListConversations(token.to_string(), self.ticket));
    }

    /// Drops the list and anything still in flight for it.
    pub fn reset(&mut self) {
        self.ticket += 1;
        self.conversations = vec![];
        self.loading = false;
        self.cursor = 0;
    }

    fn is_current(&self, ticket: u64) -> bool {
        return self.loading && ticket == self.ticket;
    }

    pub fn loaded(
        &mut self,
        ticket: u64,
        conversations: Vec<ConversationSummary>,
        open_id: Option<&str>,
    ) {
        if !self.is_current(ticket) {
            tracing::debug!(ticket, "Discarding stale conversation list");
            return;
        }

        self.conversations = conversations;
        self.loading = false;
        self.select_open(open_id);
    }

    /// The previous list stays on screen.
    pub fn failed(&mut self, ticket: u64) {
        if !self.is_current(ticket) {
            return;
        }

        tracing::warn!("Failed to fetch conversations, keeping the current list");
        self.loading = false;
    }

    pub fn select_open(&mut self, open_id: Option<&str>) {
        self.cursor = 0;
        if let Some(id) = open_id {
            if let Some(idx) = self.conversations.iter().position(|c| return c.id == id) {
                self.cursor = idx + 1;
            }
        }
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.cursor < self.conversations.len() {
            self.cursor += 1;
        }
    }

    pub fn selected_route(&self) -> Route {
        if self.cursor == 0 {
            return Route::Chat(None);
        }

        if let Some(conversation) = self.conversations.get(self.cursor - 1) {
            return Route::Chat(Some(conversation.id.to_string()));
        }

        return Route::Chat(None);
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, open_id: Option<&str>, focused: bool) {
        if self.loading && self.conversations.is_empty() {
            Loading::new("Loading chats...").render(frame, rect);
            return;
        }

        let mut items = vec![ListItem::new(NEW_CHAT_LABEL)];
        for conversation in &self.conversations {
            let mut title = conversation.title.to_string();
            if title.is_empty() {
                title = "Untitled".to_string();
            }

            let mut style = Style::default();
            if open_id == Some(conversation.id.as_str()) {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            items.push(ListItem::new(title).style(style));
        }

        let mut border_style = Style::default();
        if focused {
            border_style = border_style.fg(Color::Cyan);
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Chats")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if focused {
            state.select(Some(self.cursor));
        }

        frame.render_stateful_widget(list, rect, &mut state);
    }
}
