pub mod error;
pub mod random;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{DataError, NetworkError};
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use layers::unit::{Connection, Unit};
pub use network::config::NetworkConfig;
pub use network::network::Network;
pub use optim::sgd::Sgd;
pub use random::UniformSource;
pub use data::{LogicGate, Sample, TrainingDataReader, TrainingDataWriter};
pub use train::{train_loop, train_network, SampleStats, StopReason, TrainConfig, TrainingSummary};
