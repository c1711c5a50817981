use lipscore::{
    ArticulationEvaluator, EvaluatorConfig, MotionRecording, RecordingExtractor,
    FEEDBACK_EXCELLENT, LIP_KEYPOINT_INDICES,
};

#[test]
fn it_scores_a_saved_recording_against_itself() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.lsr");
    sample_recording(30, 0.).save_to_file(&path).unwrap();
    let evaluator =
        ArticulationEvaluator::new(RecordingExtractor::default(), EvaluatorConfig::default());
    let result = evaluator.evaluate(&path, &path);
    let score = result.score().expect("scored");
    assert_eq!(score.articulation_score, 100);
    assert_eq!(score.identity_score, 100);
    assert_eq!(score.feedback, vec![FEEDBACK_EXCELLENT]);
}

#[test]
fn it_only_scores_the_lip_keypoints() {
    let dir = tempfile::tempdir().unwrap();
    let reference_path = dir.path().join("reference.lsr");
    let patient_path = dir.path().join("patient.lsr");
    sample_recording(30, 0.).save_to_file(&reference_path).unwrap();
    sample_recording(30, 0.4).save_to_file(&patient_path).unwrap();
    let evaluator =
        ArticulationEvaluator::new(RecordingExtractor::default(), EvaluatorConfig::default());
    let result = evaluator.evaluate(&reference_path, &patient_path);
    assert_eq!(result.score().unwrap().articulation_score, 100);
}

#[test]
fn it_reloads_a_recording_from_a_buffer() {
    let recording = sample_recording(12, 0.);
    let bytes = recording.save_to_buffer().unwrap();
    let loaded = MotionRecording::load_from_buffer(&bytes).unwrap();
    assert_eq!(loaded, recording);
    assert_eq!(loaded.detected_frames(), 11);
}

#[test]
fn it_reports_missing_recordings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.lsr");
    assert!(MotionRecording::load_from_file(&path).is_err());
    let evaluator =
        ArticulationEvaluator::new(RecordingExtractor::default(), EvaluatorConfig::default());
    let result = evaluator.evaluate(&path, &path);
    assert!(result
        .error()
        .unwrap()
        .starts_with("Unable to open recording"));
}

#[test]
fn it_rejects_lip_keypoints_outside_the_face_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.lsr");
    sample_recording(10, 0.).save_to_file(&path).unwrap();
    let evaluator = ArticulationEvaluator::new(
        RecordingExtractor::new(vec![6, 30]),
        EvaluatorConfig::default(),
    );
    let result = evaluator.evaluate(&path, &path);
    assert_eq!(
        result.error(),
        Some("feature extraction failed: keypoint 30 out of range for an expression of 63 values")
    );
}

/// Recording whose first frame misses the face, `other_offset` only moves
/// the keypoints outside the lips.
fn sample_recording(frames: usize, other_offset: f32) -> MotionRecording {
    let mut recording = MotionRecording::default();
    recording.push_missed_frame();
    for index in 1..frames {
        let expression = (0..63)
            .map(|value| {
                let keypoint = value / 3;
                let base = 0.1 * keypoint as f32
                    + 0.02 * (index as f32 * 0.25 + 0.7 * value as f32).sin();
                if LIP_KEYPOINT_INDICES.contains(&keypoint) {
                    base
                } else {
                    base + other_offset * (index as f32 * 0.5).cos()
                }
            })
            .collect();
        let appearance = if index == 1 {
            Some(vec![0.3, -0.2, 0.9, 0.1])
        } else {
            None
        };
        recording.push_frame(expression, appearance).unwrap();
    }
    recording
}
