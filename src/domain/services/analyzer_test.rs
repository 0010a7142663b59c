use anyhow::bail;
use anyhow::Result;
use test_utils::user_token_fixture;

use super::AnalyzerField;
use super::AnalyzerView;
use super::ANALYZER_MISSING_INPUT;
use crate::domain::models::Action;
use crate::domain::models::AnalysisResult;
use crate::domain::models::Session;
use crate::domain::models::TextArea;

fn user_session() -> Session {
    return Session::from_token(Some(user_token_fixture()));
}

fn filled_view() -> AnalyzerView {
    let mut view = AnalyzerView::default();
    view.paste("Resume text");
    view.focus_next();
    view.paste("Job text");

    return view;
}

fn sample_result() -> AnalysisResult {
    return AnalysisResult {
        match_score: 82.0,
        strengths: "Strong backend experience.".to_string(),
        improvements: vec![
            "Mention Kubernetes".to_string(),
            "Quantify impact".to_string(),
        ],
    };
}

#[test]
fn it_blocks_blank_fields() {
    let mut view = AnalyzerView::default();
    view.paste("Senior engineer, 8 years of Rust.");

    assert!(view.submit(&user_session()).is_none());
    assert_eq!(view.error(), Some(ANALYZER_MISSING_INPUT));
    assert!(!view.is_loading());
}

#[test]
fn it_treats_whitespace_as_blank() {
    let mut view = AnalyzerView::default();
    view.paste("Resume");
    view.focus_next();
    view.paste("   ");

    assert!(view.submit(&user_session()).is_none());
    assert_eq!(view.error(), Some(ANALYZER_MISSING_INPUT));
}

#[test]
fn it_submits_both_fields() -> Result<()> {
    let mut view = AnalyzerView::default();
    view.paste("Resume text");
    view.focus_next();
    assert_eq!(view.focus(), AnalyzerField::Job);
    view.paste("Job text");

    let action = view.submit(&user_session());
    assert!(view.is_loading());
    assert_eq!(view.error(), None);

    match action {
        Some(Action::Analyze(token, ticket, req)) => {
            assert_eq!(token, user_token_fixture());
            assert_eq!(ticket, view.ticket());
            assert_eq!(req.resume_text, "Resume text");
            assert_eq!(req.job_description_text, "Job text");
        }
        _ => bail!("Wrong action"),
    }

    // A second submit while loading is ignored.
    assert!(view.submit(&user_session()).is_none());

    return Ok(());
}

#[test]
fn it_clears_the_previous_result_on_submit() {
    let mut view = filled_view();
    view.submit(&user_session());
    view.completed(view.ticket(), sample_result());
    assert!(view.result().is_some());

    view.submit(&user_session());
    assert!(view.result().is_none());
}

#[test]
fn it_stores_results_and_errors() {
    let mut view = filled_view();
    view.submit(&user_session());
    view.completed(view.ticket(), sample_result());
    assert_eq!(view.result(), Some(&sample_result()));
    assert!(!view.is_loading());

    view.submit(&user_session());
    view.failed(view.ticket(), "Analyzer is down".to_string());
    assert_eq!(view.error(), Some("Analyzer is down"));
    assert!(!view.is_loading());
}

#[test]
fn it_ignores_outcomes_after_a_reset() {
    let mut view = filled_view();
    view.submit(&user_session());
    let in_flight = view.ticket();
    view.reset();

    assert!(TextArea::content(&view.resume).is_empty());
    assert!(!view.is_loading());

    view.completed(in_flight, sample_result());
    view.failed(in_flight, "Analyzer is down".to_string());
    assert_eq!(view.result(), None);
    assert_eq!(view.error(), None);
}

#[test]
fn it_ignores_outcomes_nobody_is_waiting_for() {
    let mut view = AnalyzerView::default();
    view.completed(view.ticket(), sample_result());

    assert_eq!(view.result(), None);
}

#[test]
fn it_numbers_improvements() {
    let lines = AnalyzerView::result_lines(&sample_result())
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| return span.content.to_string())
                .collect::<String>();
        })
        .collect::<Vec<String>>();

    assert_eq!(
        lines,
        vec![
            "Key Strengths",
            "Strong backend experience.",
            "",
            "Areas for Improvement",
            "1. Mention Kubernetes",
            "2. Quantify impact",
        ]
    );
}
