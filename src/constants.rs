// Sequence validation
pub const SCORER_DEFAULT_MIN_FRAMES: usize = 5;
// Normalization
pub const NORMALIZER_DEFAULT_EPSILON: f32 = 1e-5;
// Alignment
pub const ALIGNER_DEFAULT_BAND_RADIUS: usize = 1;
pub const ALIGNER_DEFAULT_EXACT_MAX_FRAMES: usize = 600;
// Scoring
pub const SCORER_DEFAULT_ERROR_THRESHOLD: f32 = 0.5;
pub const SCORE_MAX: f32 = 100.;
// Feedback
pub const FEEDBACK_DEFAULT_EXCELLENT_THRESHOLD: f32 = 85.;
pub const FEEDBACK_DEFAULT_GOOD_THRESHOLD: f32 = 60.;
pub const FEEDBACK_DEFAULT_SLOW_PACE_RATIO: f64 = 1.3;
pub const FEEDBACK_DEFAULT_FAST_PACE_RATIO: f64 = 0.8;
// Expression layout of the face model
pub const EXPRESSION_KEYPOINTS: usize = 21;
pub const EXPRESSION_COEFFICIENTS_PER_KEYPOINT: usize = 3;
pub const LIP_KEYPOINT_INDICES: [usize; 6] = [6, 12, 14, 17, 19, 20];
// Recording files
pub const RECORDING_FILE_VERSION: u32 = 0;
