use std::path::PathBuf;
use std::process;

use clap::Parser;

use lipscore::{
    AlignerConfig, AlignmentMode, ArticulationEvaluator, EvaluatorConfig, FeedbackConfig,
    NormalizerConfig, RecordingExtractor, ScoreRounding, ScoringConfig,
};

/// Scores the lip articulation of a patient recording against a reference recording.
#[derive(Parser)]
#[command(name = "lipscore")]
struct Cli {
    /// Reference motion recording.
    reference: PathBuf,

    /// Patient motion recording.
    patient: PathBuf,

    /// Minimum number of frames with a detected face on each recording.
    #[arg(long, default_value = "5")]
    min_frames: usize,

    /// Average frame distance scored as 0.
    #[arg(long, default_value = "0.5")]
    error_threshold: f32,

    /// Score conversion: truncate or round.
    #[arg(long, default_value = "truncate")]
    rounding: ScoreRounding,

    /// Alignment mode: auto, exact, banded or multiscale.
    #[arg(long, default_value = "auto")]
    alignment: AlignmentMode,

    /// Corridor radius of the approximate alignment modes.
    #[arg(long, default_value = "1")]
    band_radius: usize,

    /// Longest sequence aligned exactly in auto mode.
    #[arg(long, default_value = "600")]
    exact_max_frames: usize,

    /// Patient to reference length ratio above which the pace is too slow.
    #[arg(long, default_value = "1.3")]
    slow_pace_ratio: f64,

    /// Patient to reference length ratio under which the pace is too fast.
    #[arg(long, default_value = "0.8")]
    fast_pace_ratio: f64,

    /// Score above which the articulation is excellent.
    #[arg(long, default_value = "85")]
    excellent_threshold: f32,

    /// Score above which the articulation is good.
    #[arg(long, default_value = "60")]
    good_threshold: f32,

    /// Expression keypoints holding the lip motion (comma-separated).
    #[arg(long, value_delimiter = ',', default_value = "6,12,14,17,19,20")]
    lip_keypoints: Vec<usize>,

    /// Read the recordings one after the other.
    #[arg(long)]
    single_thread: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = EvaluatorConfig {
        normalizer: NormalizerConfig::default(),
        aligner: AlignerConfig {
            mode: cli.alignment,
            band_radius: cli.band_radius,
            exact_max_frames: cli.exact_max_frames,
        },
        scoring: ScoringConfig {
            min_frames: cli.min_frames,
            error_threshold: cli.error_threshold,
            rounding: cli.rounding,
        },
        feedback: FeedbackConfig {
            excellent_threshold: cli.excellent_threshold,
            good_threshold: cli.good_threshold,
            slow_pace_ratio: cli.slow_pace_ratio,
            fast_pace_ratio: cli.fast_pace_ratio,
        },
        single_thread: cli.single_thread,
    };
    config.validate()?;
    let evaluator = ArticulationEvaluator::new(RecordingExtractor::new(cli.lip_keypoints), config);
    let result = evaluator.evaluate(&cli.reference, &cli.patient);
    log::info!(
        "Evaluated {} against {}",
        cli.patient.display(),
        cli.reference.display()
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    if result.is_error() {
        process::exit(2);
    }
    Ok(())
}
