#[macro_use]
extern crate savefile_derive;

mod config;
mod constants;
mod error;
mod evaluator;
mod extractor;
mod internal;
mod motion;
mod recording;
mod score;
pub use config::AlignerConfig;
pub use config::AlignmentMode;
pub use config::EvaluatorConfig;
pub use config::FeedbackConfig;
pub use config::NormalizerConfig;
pub use config::ScoreRounding;
pub use config::ScoringConfig;
pub use constants::LIP_KEYPOINT_INDICES;
pub use error::EvaluationError;
pub use error::VIDEO_TOO_SHORT_MESSAGE;
pub use evaluator::ArticulationEvaluator;
pub use extractor::extract_video_features;
pub use extractor::FaceFeatureExtractor;
pub use extractor::FrameDetection;
pub use extractor::FrameReader;
#[cfg(feature = "internals")]
pub use internal::{
    cosine_similarity, euclidean_distance, Corridor, Dtw, FeedbackGenerator, MotionComparator,
    MotionNormalizer, Scorer,
};
pub use internal::{
    FEEDBACK_EXCELLENT, FEEDBACK_GOOD, FEEDBACK_MISMATCH, FEEDBACK_TOO_FAST, FEEDBACK_TOO_SLOW,
};
pub use motion::Alignment;
pub use motion::AlignmentPath;
pub use motion::IdentityVector;
pub use motion::MotionSequence;
pub use motion::NormalizedMotionSequence;
pub use motion::RawMotionFrame;
pub use motion::VideoFeatures;
pub use recording::select_lip_coefficients;
pub use recording::MotionRecording;
pub use recording::RecordedFrame;
pub use recording::RecordingExtractor;
pub use score::ArticulationScore;
pub use score::ScoreResult;
