use std::path;

use anyhow::Result;
use test_utils::guest_token_fixture;
use test_utils::user_token_fixture;

use super::build;
use super::format_analysis;
use super::format_conversations;
use super::format_history;
use super::format_status;
use super::require_token;
use super::LOGIN_REQUIRED;
use crate::domain::models::AnalysisResult;
use crate::domain::models::ChatMessage;
use crate::domain::models::ConversationSummary;
use crate::domain::models::Role;
use crate::domain::models::Session;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_parses_protected_subcommands() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "career-agent",
        "--api-url",
        "http://localhost:5000",
        "conversations",
        "show",
        "--id",
        "abc",
    ])?;

    let (name, conversations) = matches.subcommand().unwrap();
    assert_eq!(name, "conversations");
    assert_eq!(
        conversations.get_one::<String>("api-url"),
        Some(&"http://localhost:5000".to_string())
    );

    let (name, show) = conversations.subcommand().unwrap();
    assert_eq!(name, "show");
    assert_eq!(show.get_one::<String>("id"), Some(&"abc".to_string()));

    return Ok(());
}

#[test]
fn it_requires_both_analyze_files() {
    let res = build().try_get_matches_from(vec!["career-agent", "analyze", "--resume", "cv.txt"]);
    assert!(res.is_err());
}

#[test]
fn it_rejects_unknown_themes() {
    let res = build().try_get_matches_from(vec!["career-agent", "--theme", "not-a-real-theme"]);
    assert!(res.is_err());
}

#[test]
fn it_requires_a_session_for_protected_commands() -> Result<()> {
    let err = require_token(&Session::default()).unwrap_err();
    assert_eq!(err.to_string(), LOGIN_REQUIRED);

    assert_eq!(
        require_token(&Session::from_token(Some(guest_token_fixture())))?,
        guest_token_fixture()
    );
    assert_eq!(
        require_token(&Session::from_token(Some(user_token_fixture())))?,
        user_token_fixture()
    );

    return Ok(());
}

#[test]
fn it_formats_status() {
    let session = Session::from_token(Some(guest_token_fixture()));
    let res = format_status(&session, path::Path::new("/tmp/auth-storage.json"));

    insta::assert_snapshot!(res, @r###"
    Authenticated: yes
    Guest: yes
    Session file: /tmp/auth-storage.json
    "###);
}

#[test]
fn it_formats_conversations() {
    let res = format_conversations(&[
        ConversationSummary {
            id: "a1".to_string(),
            title: "Interview prep".to_string(),
        },
        ConversationSummary {
            id: "b2".to_string(),
            title: "Salary negotiation".to_string(),
        },
    ]);

    insta::assert_snapshot!(res, @r###"
    - (ID: a1) Interview prep
    - (ID: b2) Salary negotiation
    "###);
}

#[test]
fn it_formats_history_with_authors() {
    let res = format_history(&[
        ChatMessage::new(Role::User, "How do I answer weakness questions?"),
        ChatMessage::new(Role::Model, "Pick a real one and show progress."),
    ]);

    assert_eq!(
        res,
        "You:\nHow do I answer weakness questions?\n\nCareer Coach:\nPick a real one and show progress."
    );
}

#[test]
fn it_formats_analysis() {
    let res = format_analysis(&AnalysisResult {
        match_score: 81.6,
        strengths: "Strong Rust background.".to_string(),
        improvements: vec!["Mention Kubernetes".to_string()],
    });

    assert_eq!(
        res,
        "Match Score: 82% (strong match)\n\nKey Strengths\nStrong Rust background.\n\nAreas for Improvement\n1. Mention Kubernetes"
    );
}
