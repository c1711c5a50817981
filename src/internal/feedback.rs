use crate::config::FeedbackConfig;

pub const FEEDBACK_EXCELLENT: &str = "✅ Excellent Articulation!";
pub const FEEDBACK_GOOD: &str = "ℹ️ Good effort. Watch the lip shape.";
pub const FEEDBACK_MISMATCH: &str = "❌ Lip shape mismatch. Try again.";
pub const FEEDBACK_TOO_SLOW: &str = "⚠️ Too Slow: Speak more naturally.";
pub const FEEDBACK_TOO_FAST: &str = "⚠️ Too Fast: Slow down to articulate clearly.";

pub struct FeedbackGenerator {
    config: FeedbackConfig,
}
impl FeedbackGenerator {
    pub fn new(config: FeedbackConfig) -> Self {
        FeedbackGenerator { config }
    }
    /// Quality message first, then the pace message when the patient
    /// sequence length is off the reference one.
    ///
    /// `articulation_score` is the raw score, before clamping and integer
    /// conversion.
    pub fn generate(
        &self,
        articulation_score: f32,
        reference_len: usize,
        patient_len: usize,
    ) -> Vec<String> {
        let mut feedback = vec![self.quality_message(articulation_score).to_string()];
        if let Some(pace_message) = self.pace_message(reference_len, patient_len) {
            feedback.push(pace_message.to_string());
        }
        feedback
    }
    fn quality_message(&self, articulation_score: f32) -> &'static str {
        if articulation_score > self.config.excellent_threshold {
            FEEDBACK_EXCELLENT
        } else if articulation_score > self.config.good_threshold {
            FEEDBACK_GOOD
        } else {
            FEEDBACK_MISMATCH
        }
    }
    fn pace_message(&self, reference_len: usize, patient_len: usize) -> Option<&'static str> {
        let reference_len = reference_len as f64;
        let patient_len = patient_len as f64;
        if patient_len > reference_len * self.config.slow_pace_ratio {
            Some(FEEDBACK_TOO_SLOW)
        } else if patient_len < reference_len * self.config.fast_pace_ratio {
            Some(FEEDBACK_TOO_FAST)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> FeedbackGenerator {
        FeedbackGenerator::new(FeedbackConfig::default())
    }

    #[test]
    fn it_always_starts_with_the_quality_message() {
        assert_eq!(generator().generate(100., 30, 30), vec![FEEDBACK_EXCELLENT]);
        assert_eq!(generator().generate(86., 30, 30), vec![FEEDBACK_EXCELLENT]);
        assert_eq!(generator().generate(85., 30, 30), vec![FEEDBACK_GOOD]);
        assert_eq!(generator().generate(61., 30, 30), vec![FEEDBACK_GOOD]);
        assert_eq!(generator().generate(60., 30, 30), vec![FEEDBACK_MISMATCH]);
        assert_eq!(generator().generate(-40., 30, 30), vec![FEEDBACK_MISMATCH]);
    }

    #[test]
    fn it_picks_the_quality_message_before_integer_conversion() {
        assert_eq!(generator().generate(85.5, 30, 30), vec![FEEDBACK_EXCELLENT]);
        assert_eq!(generator().generate(60.5, 30, 30), vec![FEEDBACK_GOOD]);
        assert_eq!(generator().generate(60.01, 30, 30), vec![FEEDBACK_GOOD]);
    }

    #[test]
    fn it_warns_about_slow_patients() {
        let feedback = generator().generate(90., 30, 45);
        assert_eq!(feedback, vec![FEEDBACK_EXCELLENT, FEEDBACK_TOO_SLOW]);
        assert_eq!(generator().generate(70., 30, 40)[1], FEEDBACK_TOO_SLOW);
        assert_eq!(generator().generate(70., 90, 118)[1], FEEDBACK_TOO_SLOW);
    }

    #[test]
    fn it_warns_about_fast_patients() {
        let feedback = generator().generate(40., 30, 20);
        assert_eq!(feedback, vec![FEEDBACK_MISMATCH, FEEDBACK_TOO_FAST]);
        assert_eq!(generator().generate(70., 30, 23)[1], FEEDBACK_TOO_FAST);
    }

    #[test]
    fn it_accepts_paces_inside_the_ratios() {
        assert_eq!(generator().generate(70., 30, 38).len(), 1);
        assert_eq!(generator().generate(70., 30, 30).len(), 1);
        assert_eq!(generator().generate(70., 30, 25).len(), 1);
    }

    #[test]
    fn it_accepts_paces_exactly_on_the_ratios() {
        assert_eq!(generator().generate(70., 30, 39).len(), 1);
        assert_eq!(generator().generate(70., 90, 117).len(), 1);
        assert_eq!(generator().generate(70., 170, 221).len(), 1);
        assert_eq!(generator().generate(70., 180, 234).len(), 1);
        assert_eq!(generator().generate(70., 30, 24).len(), 1);
        assert_eq!(generator().generate(70., 90, 72).len(), 1);
    }
}
