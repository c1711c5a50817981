use crate::error::EvaluationError;

/// Lip deformation coefficients of one frame with a detected face.
pub type RawMotionFrame = Vec<f32>;

/// Lip motion of one video, one row per frame with a detected face.
///
/// Frames without detection are never stored, so the sequence length is
/// the number of usable frames, not the number of decoded ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionSequence {
    frames: Vec<RawMotionFrame>,
}
impl MotionSequence {
    pub fn new() -> Self {
        MotionSequence { frames: Vec::new() }
    }
    pub fn from_frames(frames: Vec<RawMotionFrame>) -> Result<Self, EvaluationError> {
        let mut sequence = MotionSequence::new();
        for frame in frames {
            sequence.push(frame)?;
        }
        Ok(sequence)
    }
    /// Appends a frame, all frames must share the dimension of the first one.
    pub fn push(&mut self, frame: RawMotionFrame) -> Result<(), EvaluationError> {
        if let Some(expected) = self.dimension() {
            if frame.len() != expected {
                return Err(EvaluationError::DimensionMismatch {
                    expected,
                    found: frame.len(),
                });
            }
        }
        self.frames.push(frame);
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.frames.len()
    }
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
    /// Frame dimension, unknown until the first frame is pushed.
    pub fn dimension(&self) -> Option<usize> {
        self.frames.first().map(Vec::len)
    }
    pub fn frames(&self) -> &[RawMotionFrame] {
        &self.frames
    }
}

/// Zero-centered and globally scaled motion sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMotionSequence {
    frames: Vec<Vec<f32>>,
}
impl NormalizedMotionSequence {
    pub(crate) fn new(frames: Vec<Vec<f32>>) -> Self {
        NormalizedMotionSequence { frames }
    }
    pub fn len(&self) -> usize {
        self.frames.len()
    }
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
    pub fn dimension(&self) -> usize {
        self.frames.first().map(Vec::len).unwrap_or(0)
    }
    pub fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }
    /// Max absolute value across the whole matrix.
    pub fn peak(&self) -> f32 {
        peak_abs(&self.frames)
    }
    pub(crate) fn as_slices(&self) -> Vec<&[f32]> {
        self.frames.iter().map(|frame| &frame[..]).collect()
    }
}

pub(crate) fn peak_abs(frames: &[Vec<f32>]) -> f32 {
    frames
        .iter()
        .flat_map(|frame| frame.iter())
        .fold(0., |peak: f32, value| peak.max(value.abs()))
}

/// Coarse appearance signature of the first detected face of a video.
///
/// A weak "looks like the same face" heuristic, not a face recognition
/// embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityVector(Vec<f32>);
impl IdentityVector {
    pub fn new(values: Vec<f32>) -> Self {
        IdentityVector(values)
    }
    pub fn values(&self) -> &[f32] {
        &self.0
    }
}

/// Monotonic, continuous warping path between two sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentPath(Vec<(usize, usize)>);
impl AlignmentPath {
    pub fn new(pairs: Vec<(usize, usize)>) -> Self {
        AlignmentPath(pairs)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.0
    }
    pub fn first(&self) -> Option<(usize, usize)> {
        self.0.first().copied()
    }
    pub fn last(&self) -> Option<(usize, usize)> {
        self.0.last().copied()
    }
    /// Checks the path goes from (0, 0) to (na - 1, nb - 1) moving one cell
    /// at a time in i, j or both.
    pub fn is_valid_for(&self, na: usize, nb: usize) -> bool {
        if na == 0 || nb == 0 {
            return false;
        }
        if self.first() != Some((0, 0)) || self.last() != Some((na - 1, nb - 1)) {
            return false;
        }
        self.0.windows(2).all(|step| {
            let (i0, j0) = step[0];
            let (i1, j1) = step[1];
            matches!((i1.checked_sub(i0), j1.checked_sub(j0)), (Some(di), Some(dj)) if di <= 1 && dj <= 1 && di + dj > 0)
        })
    }
}

/// Result of aligning two normalized sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Cumulative Euclidean distance along the path.
    pub cost: f32,
    pub path: AlignmentPath,
}
impl Alignment {
    pub fn average_distance(&self) -> f32 {
        if self.path.is_empty() {
            return f32::INFINITY;
        }
        self.cost / self.path.len() as f32
    }
}

/// Everything the scorer needs from one video.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoFeatures {
    pub motion: MotionSequence,
    pub identity: Option<IdentityVector>,
}
impl VideoFeatures {
    pub fn new(motion: MotionSequence, identity: Option<IdentityVector>) -> Self {
        VideoFeatures { motion, identity }
    }
}
