use super::AnalysisRequest;
use super::LoginRequest;
use super::RegisterRequest;
use super::SendMessageRequest;

/// Work the UI hands to the background worker. Requests whose results land
/// on a view carry that view's ticket so late results can be dropped.
#[derive(Debug)]
pub enum Action {
    Analyze(String, u64, AnalysisRequest),
    GuestLogin(),
    ListConversations(String, u64),
    LoadConversation(String, u64, String),
    Login(LoginRequest),
    Register(RegisterRequest),
    SendMessage(String, u64, SendMessageRequest),
}
