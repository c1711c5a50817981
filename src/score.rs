use serde::Serialize;

use crate::error::EvaluationError;

/// Scores of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticulationScore {
    /// How close the patient lip motion is to the reference one, 0 - 100.
    pub articulation_score: u8,
    /// How much the patient looks like the reference face, 0 - 100.
    pub identity_score: u8,
    /// Guidance for the patient, the quality message always comes first.
    pub feedback: Vec<String>,
}

/// Outcome of an evaluation, either scores or an error message, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScoreResult {
    Scored(ArticulationScore),
    Failed { error: String },
}
impl ScoreResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ScoreResult::Failed { .. })
    }
    pub fn error(&self) -> Option<&str> {
        match self {
            ScoreResult::Failed { error } => Some(error),
            ScoreResult::Scored(_) => None,
        }
    }
    pub fn score(&self) -> Option<&ArticulationScore> {
        match self {
            ScoreResult::Scored(score) => Some(score),
            ScoreResult::Failed { .. } => None,
        }
    }
}
impl From<Result<ArticulationScore, EvaluationError>> for ScoreResult {
    fn from(result: Result<ArticulationScore, EvaluationError>) -> Self {
        match result {
            Ok(score) => ScoreResult::Scored(score),
            Err(err) => ScoreResult::Failed {
                error: err.to_string(),
            },
        }
    }
}
