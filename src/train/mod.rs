pub mod trainer;
pub mod sample_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::train_network;
pub use sample_stats::SampleStats;
pub use train_config::TrainConfig;
pub use loop_fn::{train_loop, StopReason, TrainingSummary};
