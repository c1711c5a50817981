use thiserror::Error;

/// Message shown to the end user when nothing usable could be extracted.
pub const VIDEO_TOO_SHORT_MESSAGE: &str = "Video too short or face not detected.";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("{}", VIDEO_TOO_SHORT_MESSAGE)]
    VideoTooShort {
        reference_frames: usize,
        patient_frames: usize,
        min_frames: usize,
    },
    #[error("{}", VIDEO_TOO_SHORT_MESSAGE)]
    NoMotionData,
    #[error("can not align an empty motion sequence")]
    EmptySequence,
    #[error("motion frame dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("feature extraction failed: {message}")]
    Extractor { message: String },
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
    #[error("{context}: {message}")]
    Recording {
        context: &'static str,
        message: String,
    },
}

impl EvaluationError {
    pub fn extractor(err: impl std::fmt::Display) -> Self {
        Self::Extractor {
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_config(message: impl std::fmt::Display) -> Self {
        Self::InvalidConfig {
            message: message.to_string(),
        }
    }

    pub(crate) fn recording(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Recording {
            context,
            message: err.to_string(),
        }
    }

    /// Whether the error means no usable motion was extracted.
    pub fn is_too_short(&self) -> bool {
        matches!(self, Self::VideoTooShort { .. } | Self::NoMotionData)
    }
}
