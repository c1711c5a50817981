use super::comparator::cosine_similarity;
use crate::{config::ScoreRounding, constants::SCORE_MAX, motion::IdentityVector};

pub struct Scorer {
    error_threshold: f32,
    rounding: ScoreRounding,
}
impl Scorer {
    pub fn new(error_threshold: f32, rounding: ScoreRounding) -> Self {
        Scorer {
            error_threshold,
            rounding,
        }
    }
    /// Maps an average distance of 0 to 100 and an average distance of
    /// `error_threshold` or more to 0, linearly.
    pub fn articulation_score(&self, avg_distance: f32) -> u8 {
        self.to_score(self.raw_articulation_score(avg_distance))
    }
    /// Articulation score before clamping and integer conversion.
    pub fn raw_articulation_score(&self, avg_distance: f32) -> f32 {
        SCORE_MAX - avg_distance * SCORE_MAX / self.error_threshold
    }
    /// Cosine similarity of the identity vectors as a percent, 0 when any of them is missing.
    pub fn identity_score(
        &self,
        reference: Option<&IdentityVector>,
        patient: Option<&IdentityVector>,
    ) -> u8 {
        match (reference, patient) {
            (Some(reference), Some(patient)) => {
                let cosine_distance = 1. - cosine_similarity(reference.values(), patient.values());
                self.to_score((1. - cosine_distance) * SCORE_MAX)
            }
            _ => 0,
        }
    }
    fn to_score(&self, value: f32) -> u8 {
        if value.is_nan() {
            return 0;
        }
        let value = value.clamp(0., SCORE_MAX);
        match self.rounding {
            ScoreRounding::Truncate => value.trunc() as u8,
            ScoreRounding::Round => value.round() as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn it_maps_the_distance_range_to_scores() {
        let scorer = Scorer::new(0.5, ScoreRounding::Truncate);
        assert_eq!(scorer.articulation_score(0.), 100);
        assert_eq!(scorer.articulation_score(0.25), 50);
        assert_eq!(scorer.articulation_score(0.5), 0);
        assert_eq!(scorer.articulation_score(3.), 0);
    }

    #[test]
    fn it_never_increases_with_the_distance() {
        let scorer = Scorer::new(0.5, ScoreRounding::Truncate);
        let mut previous = u8::MAX;
        for step in 0..200 {
            let score = scorer.articulation_score(step as f32 * 0.005);
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn it_keeps_the_decimals_of_the_raw_score() {
        let scorer = Scorer::new(0.5, ScoreRounding::Truncate);
        // 100 - 0.0725 * 200 = 85.5
        assert_abs_diff_eq!(scorer.raw_articulation_score(0.0725), 85.5, epsilon = 1e-4);
        assert_eq!(scorer.articulation_score(0.0725), 85);
        assert!(scorer.raw_articulation_score(3.) < 0.);
    }

    #[test]
    fn it_truncates_or_rounds() {
        let truncating = Scorer::new(0.5, ScoreRounding::Truncate);
        let rounding = Scorer::new(0.5, ScoreRounding::Round);
        // 100 - 0.004 * 200 = 99.2
        assert_eq!(truncating.articulation_score(0.004), 99);
        assert_eq!(rounding.articulation_score(0.004), 99);
        // 100 - 0.0012 * 200 = 99.76
        assert_eq!(truncating.articulation_score(0.0012), 99);
        assert_eq!(rounding.articulation_score(0.0012), 100);
    }

    #[test]
    fn it_scores_identity_by_cosine_similarity() {
        let scorer = Scorer::new(0.5, ScoreRounding::Truncate);
        let face = IdentityVector::new(vec![0.2, 0.4, 0.1]);
        let scaled = IdentityVector::new(vec![0.4, 0.8, 0.2]);
        let blank = IdentityVector::new(vec![0., 0., 0.]);
        assert!(scorer.identity_score(Some(&face), Some(&scaled)) >= 99);
        assert_eq!(scorer.identity_score(Some(&face), Some(&blank)), 0);
        assert_eq!(scorer.identity_score(Some(&face), None), 0);
        assert_eq!(scorer.identity_score(None, None), 0);
    }

    #[test]
    fn it_clamps_opposite_faces_to_zero() {
        let scorer = Scorer::new(0.5, ScoreRounding::Truncate);
        let face = IdentityVector::new(vec![1., 2.]);
        let opposite = IdentityVector::new(vec![-1., -2.]);
        assert_eq!(scorer.identity_score(Some(&face), Some(&opposite)), 0);
    }
}
