use std::sync::Arc;

use async_trait::async_trait;
use serde_derive::Deserialize;
use thiserror::Error;

use super::AnalysisRequest;
use super::AnalysisResult;
use super::ChatMessage;
use super::ConversationSummary;
use super::LoginRequest;
use super::RegisterRequest;
use super::SendMessageRequest;
use super::SendMessageResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed with status {status}")]
    Status { status: u16, msg: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Error payload the backend returns alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ApiError {
    pub fn server_message(&self) -> Option<&str> {
        if let ApiError::Status { msg: Some(msg), .. } = self {
            if !msg.trim().is_empty() {
                return Some(msg);
            }
        }

        return None;
    }

    /// Prefers the message the server sent, otherwise the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        return self.server_message().unwrap_or(fallback).to_string();
    }

    pub fn is_unauthorized(&self) -> bool {
        return matches!(self, ApiError::Status { status: 401, .. });
    }
}

pub type ApiBox = Arc<dyn CareerApi + Send + Sync>;

/// Every call the client makes against the Career Agent backend. Calls
/// that need a session take the raw token, which goes out as the auth header.
#[async_trait]
pub trait CareerApi {
    async fn register(&self, req: &RegisterRequest) -> Result<String, ApiError>;

    async fn login(&self, req: &LoginRequest) -> Result<String, ApiError>;

    async fn guest_login(&self) -> Result<String, ApiError>;

    async fn list_conversations(&self, token: &str)
        -> Result<Vec<ConversationSummary>, ApiError>;

    /// Full ordered history of a single conversation.
    async fn get_conversation(&self, token: &str, id: &str) -> Result<Vec<ChatMessage>, ApiError>;

    /// Sends one user message along with the prior history. A missing
    /// conversation id asks the backend to start a new conversation.
    async fn send_message(
        &self,
        token: &str,
        req: &SendMessageRequest,
    ) -> Result<SendMessageResponse, ApiError>;

    async fn analyze(&self, token: &str, req: &AnalysisRequest)
        -> Result<AnalysisResult, ApiError>;
}
