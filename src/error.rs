use thiserror::Error;

/// Errors raised by `Network` construction and the per-sample operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetworkError {
    #[error("invalid topology: {reason}")]
    InvalidTopology { reason: String },

    #[error("invalid network config: {reason}")]
    InvalidConfig { reason: String },

    #[error("expected {expected} input values, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error("expected {expected} target values, got {actual}")]
    TargetSizeMismatch { expected: usize, actual: usize },

    /// Input and target slices handed to `train_network` differ in length.
    #[error("{inputs} input rows but {targets} target rows")]
    SampleCountMismatch { inputs: usize, targets: usize },

    /// `train` was called before any `feed_forward`.
    #[error("train called before any feed_forward")]
    NotPropagated,
}

/// Errors raised while reading or writing the line-oriented training format,
/// or while loading configuration files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("training data is empty, expected a `topology:` line")]
    MissingTopology,

    #[error("line {line}: expected `{expected}` label, found `{found}`")]
    UnexpectedLabel {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: `{token}` is not a valid number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: {source}")]
    InvalidTopology {
        line: usize,
        #[source]
        source: NetworkError,
    },

    #[error("line {line}: expected {expected} values, got {actual}")]
    SampleSizeMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A sample that does not fit the network it was fed to.
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("unknown logic gate `{0}` (expected one of: and, or, no, xor)")]
    UnknownGate(String),
}

pub type Result<T, E = NetworkError> = std::result::Result<T, E>;
