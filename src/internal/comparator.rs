use super::{dtw::Corridor, Dtw};
use crate::{
    config::AlignmentMode,
    error::EvaluationError,
    motion::{Alignment, NormalizedMotionSequence},
};
use std::cmp;

/// Aligns two normalized motion sequences using dynamic time warping over
/// the euclidean distance between frames.
#[derive(Clone)]
pub struct MotionComparator {
    mode: AlignmentMode,
    band_radius: usize,
    exact_max_frames: usize,
}
impl MotionComparator {
    pub fn new(mode: AlignmentMode, band_radius: usize, exact_max_frames: usize) -> Self {
        MotionComparator {
            mode,
            band_radius,
            exact_max_frames,
        }
    }
    pub fn align(
        &self,
        a: &NormalizedMotionSequence,
        b: &NormalizedMotionSequence,
    ) -> Result<Alignment, EvaluationError> {
        if a.is_empty() || b.is_empty() {
            return Err(EvaluationError::EmptySequence);
        }
        let mode = self.resolve_mode(a.len(), b.len());
        #[cfg(feature = "log")]
        log::debug!(
            "aligning {} against {} frames ({} mode, radius {})",
            a.len(),
            b.len(),
            mode,
            self.band_radius
        );
        match mode {
            AlignmentMode::Banded => {
                let mut dtw = Dtw::new(MotionComparator::calculate_distance);
                dtw.compute_optimal_path_with_window(
                    &a.as_slices(),
                    &b.as_slices(),
                    self.band_radius,
                );
                to_alignment(&dtw)
            }
            AlignmentMode::Multiscale => self.align_multiscale(a.frames(), b.frames()),
            AlignmentMode::Exact | AlignmentMode::Auto => align_exact(a.frames(), b.frames()),
        }
    }
    /// Mode actually used for a pair of sequence lengths.
    pub fn resolve_mode(&self, a_len: usize, b_len: usize) -> AlignmentMode {
        match self.mode {
            AlignmentMode::Auto => {
                if cmp::max(a_len, b_len) <= self.exact_max_frames {
                    AlignmentMode::Exact
                } else {
                    AlignmentMode::Multiscale
                }
            }
            mode => mode,
        }
    }
    /// Aligns half resolution copies of the sequences, recursively, and
    /// refines the result inside a corridor around the projected path.
    fn align_multiscale(
        &self,
        a: &[Vec<f32>],
        b: &[Vec<f32>],
    ) -> Result<Alignment, EvaluationError> {
        let min_len = self.band_radius.saturating_add(2);
        if a.len() < min_len || b.len() < min_len {
            return align_exact(a, b);
        }
        let coarse_alignment = self.align_multiscale(&coarsen(a), &coarsen(b))?;
        let corridor =
            Corridor::from_coarse_path(&coarse_alignment.path, a.len(), b.len(), self.band_radius);
        let mut dtw = Dtw::new(MotionComparator::calculate_distance);
        dtw.compute_optimal_path_in_corridor(
            &a.iter().map(|item| &item[..]).collect::<Vec<_>>(),
            &b.iter().map(|item| &item[..]).collect::<Vec<_>>(),
            corridor,
        );
        to_alignment(&dtw)
    }
    pub fn calculate_distance(ax: &[f32], bx: &[f32]) -> f32 {
        euclidean_distance(ax, bx)
    }
}

fn align_exact(a: &[Vec<f32>], b: &[Vec<f32>]) -> Result<Alignment, EvaluationError> {
    let mut dtw = Dtw::new(MotionComparator::calculate_distance);
    dtw.compute_optimal_path(
        &a.iter().map(|item| &item[..]).collect::<Vec<_>>(),
        &b.iter().map(|item| &item[..]).collect::<Vec<_>>(),
    );
    to_alignment(&dtw)
}

fn to_alignment<T: Copy>(dtw: &Dtw<T>) -> Result<Alignment, EvaluationError> {
    let cost = dtw.similarity().ok_or(EvaluationError::EmptySequence)?;
    let path = dtw
        .retrieve_optimal_path()
        .ok_or(EvaluationError::EmptySequence)?;
    Ok(Alignment { cost, path })
}

/// Averages consecutive frame pairs, an odd trailing frame is kept as is.
fn coarsen(frames: &[Vec<f32>]) -> Vec<Vec<f32>> {
    frames
        .chunks(2)
        .map(|pair| match pair {
            [first, second] => first
                .iter()
                .zip(second.iter())
                .map(|(a, b)| (a + b) / 2.)
                .collect(),
            _ => pair[0].to_vec(),
        })
        .collect()
}

pub fn euclidean_distance(vector_a: &[f32], vector_b: &[f32]) -> f32 {
    vector_a
        .iter()
        .zip(vector_b.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f32>()
        .sqrt()
}

/// Cosine similarity over the shared prefix when the lengths differ, 0 when a
/// vector has no magnitude.
pub fn cosine_similarity(vector_a: &[f32], vector_b: &[f32]) -> f32 {
    let dimensionality = cmp::min(vector_a.len(), vector_b.len());
    let mut dot_ab = 0.;
    let mut dot_a = 0.;
    let mut dot_b = 0.;
    for dimension in 0..dimensionality {
        let component_a = vector_a[dimension];
        let component_b = vector_b[dimension];
        dot_ab += component_a * component_b;
        dot_a += component_a * component_a;
        dot_b += component_b * component_b;
    }
    let magnitude = f32::sqrt(dot_a * dot_b);
    if magnitude == 0. {
        0.
    } else {
        dot_ab / magnitude
    }
}
