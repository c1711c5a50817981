use crate::{
    constants::{
        ALIGNER_DEFAULT_BAND_RADIUS, ALIGNER_DEFAULT_EXACT_MAX_FRAMES,
        FEEDBACK_DEFAULT_EXCELLENT_THRESHOLD, FEEDBACK_DEFAULT_FAST_PACE_RATIO,
        FEEDBACK_DEFAULT_GOOD_THRESHOLD, FEEDBACK_DEFAULT_SLOW_PACE_RATIO,
        NORMALIZER_DEFAULT_EPSILON, SCORER_DEFAULT_ERROR_THRESHOLD, SCORER_DEFAULT_MIN_FRAMES,
    },
    error::EvaluationError,
};
/// Configures the motion normalizer.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Peak absolute value under which the sequence is considered static and is not scaled.
    pub epsilon: f32,
}
impl Default for NormalizerConfig {
    fn default() -> NormalizerConfig {
        NormalizerConfig {
            epsilon: NORMALIZER_DEFAULT_EPSILON,
        }
    }
}
/// Indicates how to align the reference and patient sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentMode {
    /// Exact alignment for short sequences, multiscale for long ones.
    Auto,
    /// Full dynamic program, quadratic in time and memory.
    Exact,
    /// Search restricted to a corridor around the diagonal.
    Banded,
    /// Coarse to fine search inside a corridor around the coarse path.
    Multiscale,
}
impl std::fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            AlignmentMode::Auto => write!(f, "auto"),
            AlignmentMode::Exact => write!(f, "exact"),
            AlignmentMode::Banded => write!(f, "banded"),
            AlignmentMode::Multiscale => write!(f, "multiscale"),
        }
    }
}
impl std::str::FromStr for AlignmentMode {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "exact" => Ok(Self::Exact),
            "banded" => Ok(Self::Banded),
            "multiscale" => Ok(Self::Multiscale),
            _ => Err("Unknown alignment mode".to_string()),
        }
    }
}
/// Configures the sequence aligner.
#[derive(Debug, Clone)]
pub struct AlignerConfig {
    /// Alignment strategy.
    pub mode: AlignmentMode,
    /// Corridor radius used by the approximate modes.
    /// A too small radius can miss the optimal path when the sequence lengths differ a lot.
    pub band_radius: usize,
    /// Longest sequence aligned exactly when the mode is [`AlignmentMode::Auto`].
    pub exact_max_frames: usize,
}
impl Default for AlignerConfig {
    fn default() -> AlignerConfig {
        AlignerConfig {
            mode: AlignmentMode::Auto,
            band_radius: ALIGNER_DEFAULT_BAND_RADIUS,
            exact_max_frames: ALIGNER_DEFAULT_EXACT_MAX_FRAMES,
        }
    }
}
/// Indicates how the final scores are converted to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRounding {
    /// Drop the decimals, can bias the score down by up to one point.
    Truncate,
    /// Round to the nearest integer.
    Round,
}
impl std::fmt::Display for ScoreRounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ScoreRounding::Truncate => write!(f, "truncate"),
            ScoreRounding::Round => write!(f, "round"),
        }
    }
}
impl std::str::FromStr for ScoreRounding {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "round" => Ok(Self::Round),
            _ => Err("Unknown score rounding".to_string()),
        }
    }
}
/// Configures the scorer.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Minimum number of detected frames required on both videos.
    pub min_frames: usize,
    /// Average per frame distance that maps to a score of 0, must be positive.
    pub error_threshold: f32,
    /// How to convert the scores to integers.
    pub rounding: ScoreRounding,
}
impl Default for ScoringConfig {
    fn default() -> ScoringConfig {
        ScoringConfig {
            min_frames: SCORER_DEFAULT_MIN_FRAMES,
            error_threshold: SCORER_DEFAULT_ERROR_THRESHOLD,
            rounding: ScoreRounding::Truncate,
        }
    }
}
/// Configures the feedback messages.
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    /// Articulation score above which the articulation is excellent.
    /// Compared against the score before it is converted to an integer.
    pub excellent_threshold: f32,
    /// Articulation score above which the articulation is acceptable.
    pub good_threshold: f32,
    /// Patient to reference length ratio above which the patient is too slow.
    pub slow_pace_ratio: f64,
    /// Patient to reference length ratio under which the patient is too fast.
    pub fast_pace_ratio: f64,
}
impl Default for FeedbackConfig {
    fn default() -> FeedbackConfig {
        FeedbackConfig {
            excellent_threshold: FEEDBACK_DEFAULT_EXCELLENT_THRESHOLD,
            good_threshold: FEEDBACK_DEFAULT_GOOD_THRESHOLD,
            slow_pace_ratio: FEEDBACK_DEFAULT_SLOW_PACE_RATIO,
            fast_pace_ratio: FEEDBACK_DEFAULT_FAST_PACE_RATIO,
        }
    }
}
/// Encapsulates all the evaluator configurations.
#[derive(Debug, Clone, Default)]
pub struct EvaluatorConfig {
    /// Configures motion normalization.
    pub normalizer: NormalizerConfig,
    /// Configures sequence alignment.
    pub aligner: AlignerConfig,
    /// Configures score computation.
    pub scoring: ScoringConfig,
    /// Configures feedback messages.
    pub feedback: FeedbackConfig,
    /// Extract the reference and patient videos one after the other instead of in parallel.
    pub single_thread: bool,
}
impl EvaluatorConfig {
    /// Rejects values the scoring can not work with.
    pub fn validate(&self) -> Result<(), EvaluationError> {
        let error_threshold = self.scoring.error_threshold;
        if !(error_threshold.is_finite() && error_threshold > 0.) {
            return Err(EvaluationError::invalid_config(format!(
                "error threshold must be a positive number, got {}",
                error_threshold
            )));
        }
        Ok(())
    }
}
