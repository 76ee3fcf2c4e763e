use std::sync::atomic::Ordering;

use tracing::{info, trace};

use crate::data::sample::Sample;
use crate::error::NetworkError;
use crate::network::network::Network;
use crate::train::sample_stats::SampleStats;
use crate::train::train_config::TrainConfig;

/// Why `train_loop` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Smoothed error fell below the target after enough passes.
    Converged,
    /// The sample source ran out.
    DataExhausted,
    /// `max_passes` was reached.
    PassLimit,
    /// The stop flag was raised.
    Stopped,
    /// The progress receiver went away.
    ReceiverDropped,
}

/// Outcome of a `train_loop` run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSummary {
    pub passes: usize,
    pub current_error: f64,
    pub smoothed_error: f64,
    pub stop_reason: StopReason,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Feeds samples to `network` one at a time (forward pass, then one weight
/// update) until the source is exhausted or `config` says to stop.
///
/// `samples` is consumed lazily and never restarted, so it can stream straight
/// from a [`TrainingDataReader`](crate::data::reader::TrainingDataReader).
/// The first source error, or the first sample that does not fit the
/// network, ends training with that error.
///
/// # Early termination
/// The loop stops early if:
/// - `config.converged(passes, smoothed_error)` holds after a pass,
/// - `config.max_passes` passes have run,
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
pub fn train_loop<I, E>(
    network: &mut Network,
    samples: I,
    config: &TrainConfig,
) -> Result<TrainingSummary, E>
where
    I: IntoIterator<Item = Result<Sample, E>>,
    E: From<NetworkError>,
{
    let mut samples = samples.into_iter();
    let mut passes = 0;

    let stop_reason = loop {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break StopReason::Stopped;
            }
        }
        if config.max_passes.map_or(false, |max| passes >= max) {
            break StopReason::PassLimit;
        }

        let sample = match samples.next() {
            Some(sample) => sample?,
            None => break StopReason::DataExhausted,
        };
        passes += 1;

        let outputs = run_one_pass(network, &sample)?;
        trace!(
            pass = passes,
            current_error = network.current_error(),
            smoothed_error = network.smoothed_error(),
            "trained on sample"
        );

        if let Some(ref tx) = config.progress_tx {
            let stats = SampleStats {
                pass: passes,
                inputs: sample.inputs,
                outputs,
                targets: sample.targets,
                current_error: network.current_error(),
                smoothed_error: network.smoothed_error(),
            };
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break StopReason::ReceiverDropped;
            }
        }

        if config.converged(passes, network.smoothed_error()) {
            break StopReason::Converged;
        }
    };

    let summary = TrainingSummary {
        passes,
        current_error: network.current_error(),
        smoothed_error: network.smoothed_error(),
        stop_reason,
    };
    info!(
        passes,
        smoothed_error = summary.smoothed_error,
        reason = ?stop_reason,
        "training finished"
    );
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One forward pass and one update. Returns the outputs seen before the update.
fn run_one_pass(network: &mut Network, sample: &Sample) -> Result<Vec<f64>, NetworkError> {
    network.feed_forward(&sample.inputs)?;
    let outputs = network.read_outputs();
    network.train(&sample.targets)?;
    Ok(outputs)
}
