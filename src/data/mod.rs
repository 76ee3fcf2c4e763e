pub mod sample;
pub mod reader;
pub mod writer;
pub mod generator;

pub use sample::Sample;
pub use reader::TrainingDataReader;
pub use writer::TrainingDataWriter;
pub use generator::{generate_samples, gate_topology, LogicGate};
