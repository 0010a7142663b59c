use anyhow::Result;

use super::AnalysisRequest;
use super::AnalysisResult;
use super::ScoreBand;

fn result_with_score(match_score: f64) -> AnalysisResult {
    return AnalysisResult {
        match_score,
        strengths: "".to_string(),
        improvements: vec![],
    };
}

#[test]
fn it_serializes_requests_in_camel_case() -> Result<()> {
    let req = AnalysisRequest {
        resume_text: "Rust engineer".to_string(),
        job_description_text: "Senior Rust role".to_string(),
    };

    assert_eq!(
        serde_json::to_value(&req)?,
        serde_json::json!({
            "resumeText": "Rust engineer",
            "jobDescriptionText": "Senior Rust role"
        })
    );

    return Ok(());
}

#[test]
fn it_reads_results() -> Result<()> {
    let body = r#"{"matchScore": 82, "strengths": "Strong systems background.", "improvements": ["Quantify impact", "Mention Kubernetes"]}"#;
    let result: AnalysisResult = serde_json::from_str(body)?;

    assert_eq!(result.score_percent(), 82);
    assert_eq!(result.strengths, "Strong systems background.");
    assert_eq!(result.improvements.len(), 2);

    return Ok(());
}

#[test]
fn it_rounds_and_clamps_scores() {
    assert_eq!(result_with_score(67.5).score_percent(), 68);
    assert_eq!(result_with_score(-3.0).score_percent(), 0);
    assert_eq!(result_with_score(140.0).score_percent(), 100);
    assert_eq!(result_with_score(f64::NAN).score_percent(), 0);
}

#[test]
fn it_bands_scores() {
    assert_eq!(result_with_score(90.0).band(), ScoreBand::Strong);
    assert_eq!(result_with_score(75.0).band(), ScoreBand::Fair);
    assert_eq!(result_with_score(51.0).band(), ScoreBand::Fair);
    assert_eq!(result_with_score(50.0).band(), ScoreBand::Weak);
    assert_eq!(result_with_score(0.0).band(), ScoreBand::Weak);
}
