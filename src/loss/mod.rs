pub mod rms;
pub mod smoothing;

pub use rms::RmsLoss;
pub use smoothing::RecentAverage;
