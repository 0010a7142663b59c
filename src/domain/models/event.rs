use tui_textarea::Input;

use super::AnalysisResult;
use super::AuthKind;
use super::ChatMessage;
use super::ConversationSummary;
use super::SendMessageResponse;

#[derive(Debug)]
pub enum Event {
    AnalysisCompleted(u64, AnalysisResult),
    AnalysisFailed(u64, String),
    AuthFailed(AuthKind, String),
    AuthSucceeded(AuthKind, String),
    ConversationsFailed(u64),
    ConversationsLoaded(u64, Vec<ConversationSummary>),
    HistoryFailed(u64, String),
    HistoryLoaded(u64, String, Vec<ChatMessage>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLG(),
    KeyboardCTRLN(),
    KeyboardCTRLR(),
    KeyboardCTRLS(),
    KeyboardEnter(),
    KeyboardFunction(u8),
    KeyboardPaste(String),
    KeyboardTab(),
    ReplyFailed(u64),
    ReplyReceived(u64, SendMessageResponse),
    UIResize(),
    UIScrollDown(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UIScrollUp(),
    UITick(),
}
