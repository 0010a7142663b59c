#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description_text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub match_score: f64,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub improvements: Vec<String>,
}

impl AnalysisResult {
    /// Rounded score clamped to 0..=100.
    pub fn score_percent(&self) -> u16 {
        if self.match_score.is_nan() {
            return 0;
        }

        return self.match_score.round().clamp(0.0, 100.0) as u16;
    }

    pub fn band(&self) -> ScoreBand {
        if self.match_score > 75.0 {
            return ScoreBand::Strong;
        }
        if self.match_score > 50.0 {
            return ScoreBand::Fair;
        }

        return ScoreBand::Weak;
    }
}
