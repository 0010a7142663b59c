use anyhow::Result;
use mockito::Matcher;

use super::HttpApi;
use super::AUTH_HEADER;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::ApiError;
use crate::domain::models::CareerApi;
use crate::domain::models::ChatMessage;
use crate::domain::models::LoginRequest;
use crate::domain::models::RegisterRequest;
use crate::domain::models::Role;
use crate::domain::models::SendMessageRequest;

#[tokio::test]
async fn it_logs_in() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(serde_json::json!({
            "email": "a@b.com",
            "password": "x"
        })))
        .with_status(200)
        .with_body(r#"{"token": "abc.def.ghi"}"#)
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let token = api
        .login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await?;

    mock.assert_async().await;
    assert_eq!(token, "abc.def.ghi");

    return Ok(());
}

#[tokio::test]
async fn it_registers() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/register")
        .match_body(Matcher::Json(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "hunter2"
        })))
        .with_status(200)
        .with_body(r#"{"token": "reg.token.sig"}"#)
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let token = api
        .register(&RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await?;

    mock.assert_async().await;
    assert_eq!(token, "reg.token.sig");

    return Ok(());
}

#[tokio::test]
async fn it_logs_in_as_guest() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/guest")
        .with_status(200)
        .with_body(r#"{"token": "guest.token.sig"}"#)
        .create_async()
        .await;

    let api = HttpApi::new(format!("{}/", server.url()));
    let token = api.guest_login().await?;

    mock.assert_async().await;
    assert_eq!(token, "guest.token.sig");

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_server_error_messages() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/login")
        .with_status(400)
        .with_body(r#"{"msg": "Invalid Credentials"}"#)
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let res = api
        .login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "wrong".to_string(),
        })
        .await;

    mock.assert_async().await;
    let err = res.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 400, .. }));
    assert_eq!(err.user_message("fallback"), "Invalid Credentials");
}

#[tokio::test]
async fn it_falls_back_without_a_server_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/guest")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let err = api.guest_login().await.unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.server_message(), None);
    assert_eq!(err.user_message("fallback"), "fallback");
}

#[tokio::test]
async fn it_lists_conversations_with_the_auth_header() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/conversations")
        .match_header(AUTH_HEADER, "tok")
        .with_status(200)
        .with_body(r#"[{"_id": "c1", "title": "Interview prep"}, {"_id": "c2", "title": "Salary"}]"#)
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let conversations = api.list_conversations("tok").await?;

    mock.assert_async().await;
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[1].id, "c2");
    assert_eq!(conversations[1].title, "Salary");

    return Ok(());
}

#[tokio::test]
async fn it_gets_a_conversation() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/conversations/c1")
        .match_header(AUTH_HEADER, "tok")
        .with_status(200)
        .with_body(
            r#"[{"role": "user", "parts": [{"text": "Hi"}]}, {"role": "model", "parts": [{"text": "Hello!"}]}]"#,
        )
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let messages = api.get_conversation("tok", "c1").await?;

    mock.assert_async().await;
    assert_eq!(
        messages,
        vec![
            ChatMessage::new(Role::User, "Hi"),
            ChatMessage::new(Role::Model, "Hello!")
        ]
    );

    return Ok(());
}

#[tokio::test]
async fn it_reports_missing_conversations() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/conversations/missing")
        .with_status(404)
        .with_body(r#"{"msg": "Conversation not found"}"#)
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let err = api.get_conversation("tok", "missing").await.unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.server_message(), Some("Conversation not found"));
}

#[tokio::test]
async fn it_sends_messages() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/conversations")
        .match_header(AUTH_HEADER, "tok")
        .match_body(Matcher::Json(serde_json::json!({
            "message": "And the cover letter?",
            "conversationId": "c1",
            "history": [
                {"role": "user", "parts": [{"text": "Review my resume"}]},
                {"role": "model", "parts": [{"text": "Looks good."}]}
            ]
        })))
        .with_status(200)
        .with_body(r#"{"reply": "Keep it to one page.", "conversationId": "c1"}"#)
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let res = api
        .send_message(
            "tok",
            &SendMessageRequest {
                message: "And the cover letter?".to_string(),
                conversation_id: Some("c1".to_string()),
                history: vec![
                    ChatMessage::new(Role::User, "Review my resume"),
                    ChatMessage::new(Role::Model, "Looks good."),
                ],
            },
        )
        .await?;

    mock.assert_async().await;
    assert_eq!(res.reply, "Keep it to one page.");
    assert_eq!(res.conversation_id, "c1");

    return Ok(());
}

#[tokio::test]
async fn it_analyzes_resumes() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/agent/analyzer")
        .match_header(AUTH_HEADER, "tok")
        .match_body(Matcher::Json(serde_json::json!({
            "resumeText": "Rust engineer",
            "jobDescriptionText": "Senior Rust role"
        })))
        .with_status(200)
        .with_body(r#"{"matchScore": 78, "strengths": "Relevant experience.", "improvements": ["Add metrics"]}"#)
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let res = api
        .analyze(
            "tok",
            &AnalysisRequest {
                resume_text: "Rust engineer".to_string(),
                job_description_text: "Senior Rust role".to_string(),
            },
        )
        .await?;

    mock.assert_async().await;
    assert_eq!(res.score_percent(), 78);
    assert_eq!(res.improvements, vec!["Add metrics".to_string()]);

    return Ok(());
}

#[tokio::test]
async fn it_flags_undecodable_bodies() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/conversations")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let err = api.list_conversations("tok").await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn it_flags_unauthorized_responses() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/conversations")
        .with_status(401)
        .with_body(r#"{"msg": "Token is not valid"}"#)
        .create_async()
        .await;

    let api = HttpApi::new(server.url());
    let err = api.list_conversations("expired").await.unwrap_err();

    mock.assert_async().await;
    assert!(err.is_unauthorized());
}
