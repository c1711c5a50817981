use std::path::Path;

use savefile::{load_file, load_from_mem, save_file, save_to_mem};

use crate::{
    constants::{
        EXPRESSION_COEFFICIENTS_PER_KEYPOINT, EXPRESSION_KEYPOINTS, LIP_KEYPOINT_INDICES,
        RECORDING_FILE_VERSION,
    },
    error::EvaluationError,
    extractor::{FaceFeatureExtractor, FrameDetection, FrameReader},
};

/// Face model output stored for one frame with a detected face.
#[derive(Savefile, Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    /// Flattened keypoint by coefficient expression tensor.
    pub expression: Vec<f32>,
    /// Appearance signature, usually only stored for the first detected frame.
    pub appearance: Option<Vec<f32>>,
}

/// Stored face model output of a whole video, one entry per decoded frame.
///
/// Lets a video be scored again without decoding it or running the face
/// model, frames without a detected face are kept as `None`.
#[derive(Savefile, Debug, Clone, PartialEq)]
pub struct MotionRecording {
    pub keypoints: usize,
    pub coefficients_per_keypoint: usize,
    pub frames: Vec<Option<RecordedFrame>>,
}
impl MotionRecording {
    pub fn new(keypoints: usize, coefficients_per_keypoint: usize) -> Self {
        MotionRecording {
            keypoints,
            coefficients_per_keypoint,
            frames: Vec::new(),
        }
    }
    pub fn push_frame(
        &mut self,
        expression: Vec<f32>,
        appearance: Option<Vec<f32>>,
    ) -> Result<(), EvaluationError> {
        let expected = self.keypoints * self.coefficients_per_keypoint;
        if expression.len() != expected {
            return Err(EvaluationError::DimensionMismatch {
                expected,
                found: expression.len(),
            });
        }
        self.frames.push(Some(RecordedFrame {
            expression,
            appearance,
        }));
        Ok(())
    }
    pub fn push_missed_frame(&mut self) {
        self.frames.push(None);
    }
    pub fn detected_frames(&self) -> usize {
        self.frames.iter().filter(|frame| frame.is_some()).count()
    }
    pub fn save_to_file(&self, path: &Path) -> Result<(), EvaluationError> {
        save_file(path_str(path)?, RECORDING_FILE_VERSION, self).map_err(|err| {
            EvaluationError::recording("Unable to save recording", format!("{:?}", err))
        })
    }
    pub fn save_to_buffer(&self) -> Result<Vec<u8>, EvaluationError> {
        save_to_mem(RECORDING_FILE_VERSION, self).map_err(|err| {
            EvaluationError::recording("Unable to generate recording bytes", format!("{:?}", err))
        })
    }
    pub fn load_from_file(path: &Path) -> Result<Self, EvaluationError> {
        if !path.is_file() {
            #[cfg(feature = "log")]
            log::warn!("Recording \"{}\" not found!", path.display());
            return Err(EvaluationError::recording(
                "Unable to open recording",
                path.display(),
            ));
        }
        load_file(path_str(path)?, RECORDING_FILE_VERSION).map_err(|err| {
            EvaluationError::recording("Unable to load recording", format!("{:?}", err))
        })
    }
    pub fn load_from_buffer(buffer: &[u8]) -> Result<Self, EvaluationError> {
        load_from_mem(buffer, RECORDING_FILE_VERSION).map_err(|err| {
            EvaluationError::recording("Unable to load recording", format!("{:?}", err))
        })
    }
}
impl Default for MotionRecording {
    fn default() -> Self {
        MotionRecording::new(EXPRESSION_KEYPOINTS, EXPRESSION_COEFFICIENTS_PER_KEYPOINT)
    }
}

fn path_str(path: &Path) -> Result<&str, EvaluationError> {
    path.to_str()
        .ok_or_else(|| EvaluationError::recording("Invalid recording path", path.display()))
}

/// Picks the coefficients of the lip keypoints out of a flattened expression tensor.
pub fn select_lip_coefficients(
    expression: &[f32],
    lip_keypoints: &[usize],
    coefficients_per_keypoint: usize,
) -> Result<Vec<f32>, EvaluationError> {
    let mut lip_motion = Vec::with_capacity(lip_keypoints.len() * coefficients_per_keypoint);
    for &keypoint in lip_keypoints {
        let start = keypoint * coefficients_per_keypoint;
        let coefficients = expression
            .get(start..start + coefficients_per_keypoint)
            .ok_or_else(|| {
                EvaluationError::extractor(format!(
                    "keypoint {} out of range for an expression of {} values",
                    keypoint,
                    expression.len()
                ))
            })?;
        lip_motion.extend_from_slice(coefficients);
    }
    Ok(lip_motion)
}

/// Extractor backed by recording files instead of decoded video.
pub struct RecordingExtractor {
    lip_keypoints: Vec<usize>,
}
impl RecordingExtractor {
    pub fn new(lip_keypoints: Vec<usize>) -> Self {
        RecordingExtractor { lip_keypoints }
    }
}
impl Default for RecordingExtractor {
    fn default() -> Self {
        RecordingExtractor::new(LIP_KEYPOINT_INDICES.to_vec())
    }
}
impl FaceFeatureExtractor for RecordingExtractor {
    fn open(&self, path: &Path) -> Result<Box<dyn FrameReader + '_>, EvaluationError> {
        let recording = MotionRecording::load_from_file(path)?;
        Ok(Box::new(RecordingReader {
            coefficients_per_keypoint: recording.coefficients_per_keypoint,
            frames: recording.frames.into_iter(),
            lip_keypoints: &self.lip_keypoints,
        }))
    }
}

struct RecordingReader<'a> {
    frames: std::vec::IntoIter<Option<RecordedFrame>>,
    lip_keypoints: &'a [usize],
    coefficients_per_keypoint: usize,
}
impl FrameReader for RecordingReader<'_> {
    fn next_frame(
        &mut self,
        with_identity: bool,
    ) -> Result<Option<Option<FrameDetection>>, EvaluationError> {
        let frame = match self.frames.next() {
            Some(Some(frame)) => frame,
            Some(None) => return Ok(Some(None)),
            None => return Ok(None),
        };
        let lip_motion = select_lip_coefficients(
            &frame.expression,
            self.lip_keypoints,
            self.coefficients_per_keypoint,
        )?;
        Ok(Some(Some(FrameDetection {
            lip_motion,
            identity: if with_identity { frame.appearance } else { None },
        })))
    }
}
