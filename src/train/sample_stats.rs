/// Per-sample progress emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop
/// sends one `SampleStats` after every training pass. Receivers (e.g. the
/// command-line printer) use it to show what the network saw and produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStats {
    /// 1-based pass number.
    pub pass: usize,
    pub inputs: Vec<f64>,
    /// Network outputs for `inputs`, read before the weights were updated.
    pub outputs: Vec<f64>,
    pub targets: Vec<f64>,
    /// RMS error of this pass.
    pub current_error: f64,
    /// Running average of the error after this pass.
    pub smoothed_error: f64,
}
