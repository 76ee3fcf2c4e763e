use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::sample_stats::SampleStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `min_samples`: passes that must complete before convergence is checked
/// - `target_error`: training stops once the smoothed error drops below this
/// - `max_passes`: optional hard cap on the number of passes
/// - `progress_tx`: optional channel sender; one `SampleStats` is sent per
///   pass.  If the receiver is dropped the loop terminates
///   early (clean shutdown).
/// - `stop_flag`: optional atomic flag; when set to `true` from another
///   thread the loop terminates before the next pass.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub min_samples: usize,
    pub target_error: f64,
    pub max_passes: Option<usize>,
    pub progress_tx: Option<mpsc::Sender<SampleStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    pub const DEFAULT_MIN_SAMPLES: usize = 100;
    pub const DEFAULT_TARGET_ERROR: f64 = 0.05;

    /// Creates a minimal `TrainConfig` with no pass cap, no progress channel
    /// and no stop flag.
    pub fn new(min_samples: usize, target_error: f64) -> Self {
        TrainConfig {
            min_samples,
            target_error,
            max_passes: None,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<SampleStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    /// True once enough passes have run and the smoothed error is low enough.
    pub fn converged(&self, passes: usize, smoothed_error: f64) -> bool {
        passes >= self.min_samples && smoothed_error < self.target_error
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(Self::DEFAULT_MIN_SAMPLES, Self::DEFAULT_TARGET_ERROR)
    }
}
