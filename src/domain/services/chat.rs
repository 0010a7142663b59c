#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChatMessage;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Route;
use crate::domain::models::SendMessageRequest;
use crate::domain::models::SendMessageResponse;
use crate::domain::models::Session;

pub const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";
pub const EMPTY_CHAT_TITLE: &str = "Start a New Conversation";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    LoadingHistory,
    Ready,
    AwaitingReply,
}

/// State of the chat screen for the open conversation. Every visit bumps the
/// ticket, and results tagged with an older ticket are dropped.
pub struct ChatView {
    phase: ChatPhase,
    conversation_id: Option<String>,
    pub messages: Vec<Message>,
    ticket: u64,
}

impl Default for ChatView {
    fn default() -> ChatView {
        return ChatView {
            phase: ChatPhase::Idle,
            conversation_id: None,
            messages: vec![],
            ticket: 0,
        };
    }
}

impl ChatView {
    pub fn phase(&self) -> ChatPhase {
        return self.phase;
    }

    pub fn conversation_id(&self) -> Option<&str> {
        return self.conversation_id.as_deref();
    }

    pub fn ticket(&self) -> u64 {
        return self.ticket;
    }

    pub fn accepts_input(&self) -> bool {
        return self.phase == ChatPhase::Ready;
    }

    pub fn is_empty_state(&self) -> bool {
        return self.messages.is_empty() && self.conversation_id.is_none();
    }

    /// Opens a conversation. History is only fetched for registered users
    /// holding a token, guests always start from an empty chat.
    pub fn enter(&mut self, conversation_id: Option<String>, session: &Session) -> Option<Action> {
        self.ticket += 1;
        self.messages = vec![];
        self.conversation_id = conversation_id;

        if let (Some(id), Some(token)) = (&self.conversation_id, session.token()) {
            if !session.is_guest() {
                self.phase = ChatPhase::LoadingHistory;
                tracing::debug!(conversation_id = %id, ticket = self.ticket, "Loading conversation history");
                return Some(Action::LoadConversation(
                    token.to_string(),
                    self.ticket,
                    id.to_string(),
                ));
            }
        }

        self.phase = ChatPhase::Ready;
        return None;
    }

    /// Closes the chat. Anything still in flight for it is dropped on arrival.
    pub fn leave(&mut self) {
        self.ticket += 1;
        self.messages = vec![];
        self.conversation_id = None;
        self.phase = ChatPhase::Idle;
    }

    fn is_current(&self, ticket: u64, conversation_id: &str) -> bool {
        return ticket == self.ticket && self.conversation_id.as_deref() == Some(conversation_id);
    }

    /// Returns false when the history belongs to a conversation that is no
    /// longer open.
    pub fn history_loaded(
        &mut self,
        ticket: u64,
        conversation_id: &str,
        history: &[ChatMessage],
    ) -> bool {
        if !self.is_current(ticket, conversation_id) || self.phase != ChatPhase::LoadingHistory {
            tracing::debug!(ticket, conversation_id, "Discarding stale conversation history");
            return false;
        }

        self.messages = history.iter().map(Message::from).collect();
        self.phase = ChatPhase::Ready;
        return true;
    }

    /// Returns true when the caller should fall back to a fresh `/chat`.
    pub fn history_failed(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || self.phase != ChatPhase::LoadingHistory {
            return false;
        }

        self.messages = vec![];
        self.conversation_id = None;
        self.phase = ChatPhase::Ready;
        return true;
    }

    pub fn submit(&mut self, input: &str, session: &Session) -> Option<Action> {
        if input.trim().is_empty() || !self.accepts_input() {
            return None;
        }

        let token = session.token()?;
        let history = self
            .messages
            .iter()
            .map(|message| return message.to_chat())
            .collect::<Vec<ChatMessage>>();

        self.messages.push(Message::new(Author::User, input));
        self.phase = ChatPhase::AwaitingReply;

        return Some(Action::SendMessage(
            token.to_string(),
            self.ticket,
            SendMessageRequest {
                message: input.to_string(),
                conversation_id: self.conversation_id.clone(),
                history,
            },
        ));
    }

    /// Appends the reply. When the chat had no id yet the returned one is
    /// adopted and the new route for it is handed back.
    pub fn reply_received(&mut self, ticket: u64, response: SendMessageResponse) -> Option<Route> {
        if ticket != self.ticket || self.phase != ChatPhase::AwaitingReply {
            tracing::debug!(ticket, "Discarding reply for a chat that is no longer open");
            return None;
        }

        self.messages
            .push(Message::new(Author::Model, &response.reply));
        self.phase = ChatPhase::Ready;

        if self.conversation_id.is_none() && !response.conversation_id.is_empty() {
            self.conversation_id = Some(response.conversation_id.to_string());
            return Some(Route::Chat(Some(response.conversation_id)));
        }

        return None;
    }

    pub fn reply_failed(&mut self, ticket: u64) {
        if ticket != self.ticket || self.phase != ChatPhase::AwaitingReply {
            return;
        }

        self.messages.push(Message::new_with_type(
            Author::Model,
            MessageType::Error,
            CHAT_ERROR_REPLY,
        ));
        self.phase = ChatPhase::Ready;
    }
}
