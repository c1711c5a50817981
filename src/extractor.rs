use std::path::Path;

use crate::{
    error::EvaluationError,
    motion::{IdentityVector, MotionSequence, VideoFeatures},
};

/// Face model output for one decoded frame with a detected face.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDetection {
    /// Lip deformation coefficients, same length on every frame of a video.
    pub lip_motion: Vec<f32>,
    /// Appearance signature, only expected when it was requested.
    pub identity: Option<Vec<f32>>,
}

/// Scoped decode handle over one video.
///
/// Implementations release their decoder on drop, so the handle is freed on
/// every exit path of the extraction.
pub trait FrameReader {
    /// Decodes the next frame and runs the face model on it.
    ///
    /// Returns `Ok(None)` at the end of the video and `Ok(Some(None))` for a
    /// frame where no face was detected. `with_identity` asks the model for
    /// the appearance signature of that frame.
    fn next_frame(
        &mut self,
        with_identity: bool,
    ) -> Result<Option<Option<FrameDetection>>, EvaluationError>;
}

/// Turns a video into per frame lip motion and an identity signature.
pub trait FaceFeatureExtractor: Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn FrameReader + '_>, EvaluationError>;
}

/// Reads a whole video, skipping frames without a face.
///
/// The identity vector is only requested on the first detected frame.
pub fn extract_video_features<E: FaceFeatureExtractor + ?Sized>(
    extractor: &E,
    path: &Path,
) -> Result<VideoFeatures, EvaluationError> {
    let mut reader = extractor.open(path)?;
    let mut motion = MotionSequence::new();
    let mut identity: Option<IdentityVector> = None;
    while let Some(detection) = reader.next_frame(motion.is_empty())? {
        let Some(detection) = detection else {
            continue;
        };
        if motion.is_empty() {
            identity = detection.identity.map(IdentityVector::new);
        }
        motion.push(detection.lip_motion)?;
    }
    #[cfg(feature = "log")]
    log::debug!(
        "{}: {} frames with a detected face (identity {})",
        path.display(),
        motion.len(),
        if identity.is_some() { "captured" } else { "missing" }
    );
    Ok(VideoFeatures::new(motion, identity))
}
