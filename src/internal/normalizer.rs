use crate::{
    error::EvaluationError,
    motion::{peak_abs, MotionSequence, NormalizedMotionSequence},
};

pub struct MotionNormalizer {
    epsilon: f32,
}
impl MotionNormalizer {
    pub fn new(epsilon: f32) -> Self {
        MotionNormalizer { epsilon }
    }
    /// Removes the resting face bias of each coefficient and scales the whole
    /// sequence by its peak absolute value.
    ///
    /// A single scale factor keeps the amplitude relation between quiet and
    /// loud frames. Sequences whose peak is under epsilon are only centered.
    pub fn normalize(
        &self,
        sequence: &MotionSequence,
    ) -> Result<NormalizedMotionSequence, EvaluationError> {
        let num_frames = sequence.len();
        let num_coefficients = match sequence.dimension() {
            Some(dimension) if num_frames > 0 => dimension,
            _ => return Err(EvaluationError::NoMotionData),
        };
        let mut sum = vec![0f32; num_coefficients];
        for frame in sequence.frames() {
            for (sum_item, value) in sum.iter_mut().zip(frame.iter()) {
                *sum_item += value;
            }
        }
        let mean = sum
            .iter()
            .map(|sum_item| sum_item / num_frames as f32)
            .collect::<Vec<f32>>();
        let mut normalized_frames = sequence
            .frames()
            .iter()
            .map(|frame| {
                frame
                    .iter()
                    .zip(mean.iter())
                    .map(|(value, mean_item)| value - mean_item)
                    .collect::<Vec<f32>>()
            })
            .collect::<Vec<_>>();
        let peak = peak_abs(&normalized_frames);
        if peak > self.epsilon {
            for normalized_frame in normalized_frames.iter_mut() {
                for value in normalized_frame.iter_mut() {
                    *value /= peak;
                }
            }
        }
        Ok(NormalizedMotionSequence::new(normalized_frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NORMALIZER_DEFAULT_EPSILON;
    use approx::assert_abs_diff_eq;

    fn column_means(sequence: &NormalizedMotionSequence) -> Vec<f32> {
        let mut means = vec![0f32; sequence.dimension()];
        for frame in sequence.frames() {
            for (mean, value) in means.iter_mut().zip(frame.iter()) {
                *mean += value / sequence.len() as f32;
            }
        }
        means
    }

    #[test]
    fn it_fails_without_frames() {
        let normalizer = MotionNormalizer::new(NORMALIZER_DEFAULT_EPSILON);
        assert_eq!(
            normalizer.normalize(&MotionSequence::new()),
            Err(EvaluationError::NoMotionData)
        );
    }

    #[test]
    fn it_zero_centers_and_scales_to_unit_peak() {
        let sequence = MotionSequence::from_frames(vec![
            vec![1.0, 10.0, -3.0],
            vec![2.0, 12.0, -3.5],
            vec![4.0, 11.0, -2.0],
            vec![1.5, 9.0, -4.0],
        ])
        .unwrap();
        let normalized = MotionNormalizer::new(NORMALIZER_DEFAULT_EPSILON)
            .normalize(&sequence)
            .unwrap();
        for mean in column_means(&normalized) {
            assert_abs_diff_eq!(mean, 0., epsilon = 1e-6);
        }
        assert_abs_diff_eq!(normalized.peak(), 1., epsilon = 1e-6);
    }

    #[test]
    fn it_keeps_relative_amplitude_between_frames() {
        let sequence =
            MotionSequence::from_frames(vec![vec![-1.0], vec![-0.5], vec![0.5], vec![1.0]])
                .unwrap();
        let normalized = MotionNormalizer::new(NORMALIZER_DEFAULT_EPSILON)
            .normalize(&sequence)
            .unwrap();
        assert_abs_diff_eq!(normalized.frames()[1][0], -0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(normalized.frames()[3][0], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn it_only_centers_static_sequences() {
        let sequence =
            MotionSequence::from_frames(vec![vec![0.3, 0.2], vec![0.300001, 0.2]]).unwrap();
        let normalized = MotionNormalizer::new(NORMALIZER_DEFAULT_EPSILON)
            .normalize(&sequence)
            .unwrap();
        assert!(normalized.peak() < NORMALIZER_DEFAULT_EPSILON);
        for mean in column_means(&normalized) {
            assert_abs_diff_eq!(mean, 0., epsilon = 1e-6);
        }
    }
}
