use anyhow::bail;
use anyhow::Result;
use test_utils::guest_token_fixture;
use test_utils::user_token_fixture;

use super::ChatPhase;
use super::ChatView;
use super::CHAT_ERROR_REPLY;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChatMessage;
use crate::domain::models::Role;
use crate::domain::models::Route;
use crate::domain::models::SendMessageResponse;
use crate::domain::models::Session;

fn user_session() -> Session {
    return Session::from_token(Some(user_token_fixture()));
}

fn reply(text: &str, id: &str) -> SendMessageResponse {
    return SendMessageResponse {
        reply: text.to_string(),
        conversation_id: id.to_string(),
    };
}

mod enter {
    use super::*;

    #[test]
    fn it_starts_empty_without_an_id() {
        let mut chat = ChatView::default();
        let action = chat.enter(None, &user_session());

        assert!(action.is_none());
        assert_eq!(chat.phase(), ChatPhase::Ready);
        assert!(chat.is_empty_state());
    }

    #[test]
    fn it_loads_history_for_users() -> Result<()> {
        let mut chat = ChatView::default();
        let action = chat.enter(Some("abc".to_string()), &user_session());

        assert_eq!(chat.phase(), ChatPhase::LoadingHistory);
        match action {
            Some(Action::LoadConversation(token, ticket, id)) => {
                assert_eq!(token, user_token_fixture());
                assert_eq!(ticket, chat.ticket());
                assert_eq!(id, "abc");
            }
            _ => bail!("Wrong action"),
        }

        return Ok(());
    }

    #[test]
    fn it_never_loads_history_for_guests() {
        let mut chat = ChatView::default();
        let session = Session::from_token(Some(guest_token_fixture()));
        let action = chat.enter(Some("abc".to_string()), &session);

        assert!(action.is_none());
        assert_eq!(chat.phase(), ChatPhase::Ready);
        assert!(chat.messages.is_empty());
        assert_eq!(chat.conversation_id(), Some("abc"));
    }

    #[test]
    fn it_does_not_load_history_without_a_token() {
        let mut chat = ChatView::default();
        let action = chat.enter(Some("abc".to_string()), &Session::default());

        assert!(action.is_none());
        assert_eq!(chat.phase(), ChatPhase::Ready);
    }
}

mod history {
    use super::*;

    #[test]
    fn it_applies_matching_history() {
        let mut chat = ChatView::default();
        chat.enter(Some("abc".to_string()), &user_session());
        let ticket = chat.ticket();

        let applied = chat.history_loaded(
            ticket,
            "abc",
            &[
                ChatMessage::new(Role::User, "Hi"),
                ChatMessage::new(Role::Model, "Hello! How can I help?"),
            ],
        );

        assert!(applied);
        assert_eq!(chat.phase(), ChatPhase::Ready);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].author, Author::User);
        assert_eq!(chat.messages[1].text, "Hello! How can I help?");
    }

    #[test]
    fn it_discards_history_for_a_conversation_no_longer_open() {
        let mut chat = ChatView::default();
        chat.enter(Some("first".to_string()), &user_session());
        let stale_ticket = chat.ticket();
        chat.enter(Some("second".to_string()), &user_session());

        let applied = chat.history_loaded(
            stale_ticket,
            "first",
            &[ChatMessage::new(Role::User, "Old")],
        );

        assert!(!applied);
        assert!(chat.messages.is_empty());
        assert_eq!(chat.phase(), ChatPhase::LoadingHistory);
    }

    #[test]
    fn it_resets_on_failure() {
        let mut chat = ChatView::default();
        chat.enter(Some("abc".to_string()), &user_session());

        assert!(chat.history_failed(chat.ticket()));
        assert_eq!(chat.conversation_id(), None);
        assert!(chat.messages.is_empty());
        assert_eq!(chat.phase(), ChatPhase::Ready);
    }

    #[test]
    fn it_ignores_stale_failures() {
        let mut chat = ChatView::default();
        chat.enter(Some("abc".to_string()), &user_session());
        let stale_ticket = chat.ticket();
        chat.enter(None, &user_session());

        assert!(!chat.history_failed(stale_ticket));
    }
}

mod submit {
    use super::*;

    #[test]
    fn it_ignores_blank_input() {
        let mut chat = ChatView::default();
        chat.enter(None, &user_session());

        assert!(chat.submit("   \n ", &user_session()).is_none());
        assert!(chat.messages.is_empty());
        assert_eq!(chat.phase(), ChatPhase::Ready);
    }

    #[test]
    fn it_sends_history_before_the_new_message() -> Result<()> {
        let mut chat = ChatView::default();
        chat.enter(Some("abc".to_string()), &user_session());
        chat.history_loaded(
            chat.ticket(),
            "abc",
            &[
                ChatMessage::new(Role::User, "Hi"),
                ChatMessage::new(Role::Model, "Hello!"),
            ],
        );

        let action = chat.submit("How do I negotiate salary?", &user_session());

        assert_eq!(chat.phase(), ChatPhase::AwaitingReply);
        assert_eq!(chat.messages.len(), 3);
        assert_eq!(chat.messages[2].author, Author::User);

        match action {
            Some(Action::SendMessage(_token, ticket, req)) => {
                assert_eq!(ticket, chat.ticket());
                assert_eq!(req.message, "How do I negotiate salary?");
                assert_eq!(req.conversation_id, Some("abc".to_string()));
                assert_eq!(
                    req.history,
                    vec![
                        ChatMessage::new(Role::User, "Hi"),
                        ChatMessage::new(Role::Model, "Hello!"),
                    ]
                );
            }
            _ => bail!("Wrong action"),
        }

        return Ok(());
    }

    #[test]
    fn it_rejects_input_while_awaiting_a_reply() {
        let mut chat = ChatView::default();
        chat.enter(None, &user_session());

        assert!(chat.submit("First", &user_session()).is_some());
        assert!(chat.submit("Second", &user_session()).is_none());

        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].text, "First");
    }

    #[test]
    fn it_rejects_input_while_loading_history() {
        let mut chat = ChatView::default();
        chat.enter(Some("abc".to_string()), &user_session());

        assert!(chat.submit("Hello", &user_session()).is_none());
        assert!(chat.messages.is_empty());
    }
}

mod reply {
    use super::*;

    #[test]
    fn it_adopts_a_new_conversation_id() {
        let mut chat = ChatView::default();
        chat.enter(None, &user_session());
        chat.submit("Hello", &user_session());

        let route = chat.reply_received(chat.ticket(), reply("Hi! How can I help?", "xyz"));

        assert_eq!(route, Some(Route::Chat(Some("xyz".to_string()))));
        assert_eq!(chat.conversation_id(), Some("xyz"));
        assert_eq!(chat.phase(), ChatPhase::Ready);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].author, Author::Model);
    }

    #[test]
    fn it_keeps_an_existing_conversation_id() {
        let mut chat = ChatView::default();
        chat.enter(Some("abc".to_string()), &user_session());
        chat.history_loaded(chat.ticket(), "abc", &[]);
        chat.submit("Hello", &user_session());

        let route = chat.reply_received(chat.ticket(), reply("Hi!", "abc"));

        assert_eq!(route, None);
        assert_eq!(chat.conversation_id(), Some("abc"));
    }

    #[test]
    fn it_keeps_guest_messages_when_adopting_an_id() {
        let session = Session::from_token(Some(guest_token_fixture()));
        let mut chat = ChatView::default();
        chat.enter(None, &session);
        chat.submit("Hello", &session);

        chat.reply_received(chat.ticket(), reply("Hi guest!", "g-1"));

        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].text, "Hello");
        assert_eq!(chat.messages[1].text, "Hi guest!");
    }

    #[test]
    fn it_appends_a_fixed_message_on_failure() {
        let mut chat = ChatView::default();
        chat.enter(None, &user_session());
        chat.submit("Hello", &user_session());

        chat.reply_failed(chat.ticket());

        assert_eq!(chat.phase(), ChatPhase::Ready);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].author, Author::Model);
        assert_eq!(chat.messages[1].text, CHAT_ERROR_REPLY);
    }

    #[test]
    fn it_discards_replies_after_leaving_the_chat() {
        let mut chat = ChatView::default();
        chat.enter(None, &user_session());
        chat.submit("Hello", &user_session());
        let stale_ticket = chat.ticket();
        chat.enter(Some("other".to_string()), &user_session());

        let route = chat.reply_received(stale_ticket, reply("Late", "xyz"));

        assert_eq!(route, None);
        assert!(chat.messages.is_empty());
    }

    #[test]
    fn it_discards_replies_after_closing_the_chat() {
        let mut chat = ChatView::default();
        chat.enter(None, &user_session());
        chat.submit("Hello", &user_session());
        let in_flight = chat.ticket();
        chat.leave();

        assert_eq!(chat.phase(), ChatPhase::Idle);
        assert_eq!(chat.reply_received(in_flight, reply("Late", "xyz")), None);
        chat.reply_failed(in_flight);
        assert!(chat.messages.is_empty());
        assert_eq!(chat.conversation_id(), None);
    }
}
