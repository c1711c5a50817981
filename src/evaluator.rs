use std::path::Path;
use std::thread;

use crate::{
    config::EvaluatorConfig,
    error::EvaluationError,
    extractor::{extract_video_features, FaceFeatureExtractor},
    internal::{FeedbackGenerator, MotionComparator, MotionNormalizer, Scorer},
    motion::VideoFeatures,
    score::{ArticulationScore, ScoreResult},
};

/// Scores a patient practice video against a reference one.
///
/// The evaluator holds no state between calls, every evaluation is a pure
/// function of the two videos and the configuration.
pub struct ArticulationEvaluator<E: FaceFeatureExtractor> {
    extractor: E,
    invalid_config: Option<EvaluationError>,
    single_thread: bool,
    min_frames: usize,
    normalizer: MotionNormalizer,
    comparator: MotionComparator,
    scorer: Scorer,
    feedback: FeedbackGenerator,
}
impl<E: FaceFeatureExtractor> ArticulationEvaluator<E> {
    pub fn new(extractor: E, config: EvaluatorConfig) -> Self {
        ArticulationEvaluator {
            extractor,
            invalid_config: config.validate().err(),
            single_thread: config.single_thread,
            min_frames: config.scoring.min_frames,
            normalizer: MotionNormalizer::new(config.normalizer.epsilon),
            comparator: MotionComparator::new(
                config.aligner.mode,
                config.aligner.band_radius,
                config.aligner.exact_max_frames,
            ),
            scorer: Scorer::new(config.scoring.error_threshold, config.scoring.rounding),
            feedback: FeedbackGenerator::new(config.feedback),
        }
    }
    /// Evaluates the patient video against the reference video.
    ///
    /// Never fails, any error is returned as the error variant of the result.
    pub fn evaluate(&self, reference_path: &Path, patient_path: &Path) -> ScoreResult {
        let result = self
            .try_evaluate(reference_path, patient_path)
            .map_err(|err| {
                #[cfg(feature = "log")]
                log::warn!("evaluation failed: {}", err);
                err
            });
        ScoreResult::from(result)
    }
    pub fn try_evaluate(
        &self,
        reference_path: &Path,
        patient_path: &Path,
    ) -> Result<ArticulationScore, EvaluationError> {
        self.check_config()?;
        let (reference, patient) = self.extract_pair(reference_path, patient_path)?;
        self.score_features(&reference, &patient)
    }
    /// Extracts both videos, in parallel unless configured as single thread.
    pub fn extract_pair(
        &self,
        reference_path: &Path,
        patient_path: &Path,
    ) -> Result<(VideoFeatures, VideoFeatures), EvaluationError> {
        if self.single_thread {
            let reference = extract_video_features(&self.extractor, reference_path)?;
            let patient = extract_video_features(&self.extractor, patient_path)?;
            return Ok((reference, patient));
        }
        let extractor = &self.extractor;
        let (reference, patient) = thread::scope(|scope| {
            let reference_handle =
                scope.spawn(move || extract_video_features(extractor, reference_path));
            let patient_handle =
                scope.spawn(move || extract_video_features(extractor, patient_path));
            (join_extraction(reference_handle), join_extraction(patient_handle))
        });
        Ok((reference?, patient?))
    }
    /// Scores already extracted videos.
    pub fn score_features(
        &self,
        reference: &VideoFeatures,
        patient: &VideoFeatures,
    ) -> Result<ArticulationScore, EvaluationError> {
        self.check_config()?;
        let reference_frames = reference.motion.len();
        let patient_frames = patient.motion.len();
        if reference_frames < self.min_frames || patient_frames < self.min_frames {
            return Err(EvaluationError::VideoTooShort {
                reference_frames,
                patient_frames,
                min_frames: self.min_frames,
            });
        }
        let reference_motion = self.normalizer.normalize(&reference.motion)?;
        let patient_motion = self.normalizer.normalize(&patient.motion)?;
        let alignment = self
            .comparator
            .align(&reference_motion, &patient_motion)
            .map_err(|err| {
                #[cfg(feature = "log")]
                log::error!("alignment precondition violated: {}", err);
                err
            })?;
        let avg_distance = alignment.average_distance();
        let raw_score = self.scorer.raw_articulation_score(avg_distance);
        let articulation_score = self.scorer.articulation_score(avg_distance);
        let identity_score = self
            .scorer
            .identity_score(reference.identity.as_ref(), patient.identity.as_ref());
        #[cfg(feature = "log")]
        log::debug!(
            "alignment cost {} over {} steps (avg {}), articulation {}, identity {}",
            alignment.cost,
            alignment.path.len(),
            avg_distance,
            articulation_score,
            identity_score
        );
        Ok(ArticulationScore {
            articulation_score,
            identity_score,
            feedback: self
                .feedback
                .generate(raw_score, reference_frames, patient_frames),
        })
    }
    fn check_config(&self) -> Result<(), EvaluationError> {
        match &self.invalid_config {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
    pub fn extractor(&self) -> &E {
        &self.extractor
    }
}

fn join_extraction(
    handle: thread::ScopedJoinHandle<'_, Result<VideoFeatures, EvaluationError>>,
) -> Result<VideoFeatures, EvaluationError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(EvaluationError::extractor("extraction thread panicked")))
}
