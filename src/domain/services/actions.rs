#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::ANALYZER_FALLBACK_ERROR;
use crate::domain::models::Action;
use crate::domain::models::ApiBox;
use crate::domain::models::ApiError;
use crate::domain::models::AuthKind;
use crate::domain::models::Event;

pub struct ActionsService {}

impl ActionsService {
    /// Performs a single action against the API and turns the outcome into
    /// the event the UI expects. Failures never escape as errors.
    pub async fn run(api: &ApiBox, action: Action) -> Event {
        match action {
            Action::Login(req) => {
                return auth_event(AuthKind::Login, api.login(&req).await);
            }
            Action::Register(req) => {
                return auth_event(AuthKind::Register, api.register(&req).await);
            }
            Action::GuestLogin() => {
                return auth_event(AuthKind::Guest, api.guest_login().await);
            }
            Action::ListConversations(token, ticket) => match api.list_conversations(&token).await {
                Ok(conversations) => {
                    return Event::ConversationsLoaded(ticket, conversations);
                }
                Err(err) => {
                    if err.is_unauthorized() {
                        tracing::warn!("Session token was rejected, log in again to restore it");
                    }
                    tracing::warn!(error = %err, "Failed to list conversations");
                    return Event::ConversationsFailed(ticket);
                }
            },
            Action::LoadConversation(token, ticket, id) => {
                match api.get_conversation(&token, &id).await {
                    Ok(history) => {
                        return Event::HistoryLoaded(ticket, id, history);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, conversation_id = %id, "Failed to load conversation");
                        return Event::HistoryFailed(ticket, id);
                    }
                }
            }
            Action::SendMessage(token, ticket, req) => match api.send_message(&token, &req).await {
                Ok(res) => {
                    return Event::ReplyReceived(ticket, res);
                }
                Err(err) => {
                    tracing::error!(error = %err, "Failed to send message");
                    return Event::ReplyFailed(ticket);
                }
            },
            Action::Analyze(token, ticket, req) => match api.analyze(&token, &req).await {
                Ok(result) => {
                    return Event::AnalysisCompleted(ticket, result);
                }
                Err(err) => {
                    tracing::error!(error = %err, "Resume analysis failed");
                    return Event::AnalysisFailed(ticket, err.user_message(ANALYZER_FALLBACK_ERROR));
                }
            },
        }
    }

    /// Spawns one task per action. Nothing is cancelled, so results may land
    /// after the UI moved on.
    pub async fn start(
        api: ApiBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            let worker_api = api.clone();
            let worker_tx = tx.clone();

            tokio::spawn(async move {
                let event = ActionsService::run(&worker_api, action).await;
                if worker_tx.send(event).is_err() {
                    tracing::debug!("UI is gone, dropping worker result");
                }
            });
        }

        return Ok(());
    }
}

fn auth_event(kind: AuthKind, res: Result<String, ApiError>) -> Event {
    match res {
        Ok(token) => {
            return Event::AuthSucceeded(kind, token);
        }
        Err(err) => {
            tracing::error!(error = %err, kind = %kind, "Authentication failed");
            return Event::AuthFailed(kind, err.user_message(kind.fallback_message()));
        }
    }
}
