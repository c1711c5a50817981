mod comparator;
mod dtw;
mod feedback;
mod normalizer;
mod scorer;
pub use comparator::{cosine_similarity, euclidean_distance, MotionComparator};
pub use dtw::{Corridor, Dtw};
pub use feedback::{
    FeedbackGenerator, FEEDBACK_EXCELLENT, FEEDBACK_GOOD, FEEDBACK_MISMATCH, FEEDBACK_TOO_FAST,
    FEEDBACK_TOO_SLOW,
};
pub use normalizer::MotionNormalizer;
pub use scorer::Scorer;
