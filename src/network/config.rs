use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{DataError, NetworkError};
use crate::optim::sgd::Sgd;

/// Hyperparameters fixed for the lifetime of a `Network`.
///
/// Every field has a default, so a JSON file only needs the fields it changes:
///
/// ```json
/// { "learning_rate": 0.2, "momentum": 0.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Step size of every weight update, usually in `[0, 1]`.
    pub learning_rate: f64,
    /// Multiplier of each connection's previous delta; `None` disables momentum.
    pub momentum: Option<f64>,
    /// Roughly how many recent samples the smoothed error averages over.
    pub smoothing_factor: f64,
    pub activation: ActivationFunction,
}

impl NetworkConfig {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.15;
    pub const DEFAULT_MOMENTUM: f64 = 0.5;
    pub const DEFAULT_SMOOTHING_FACTOR: f64 = 100.0;

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = Some(momentum);
        self
    }

    pub fn without_momentum(mut self) -> Self {
        self.momentum = None;
        self
    }

    pub fn with_smoothing_factor(mut self, smoothing_factor: f64) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> Self {
        self.activation = activation;
        self
    }

    /// Rejects settings that would make an update or the smoothed error
    /// non-finite.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(invalid(format!(
                "learning_rate must be finite and non-negative, got {}",
                self.learning_rate
            )));
        }
        if let Some(momentum) = self.momentum {
            if !momentum.is_finite() {
                return Err(invalid(format!("momentum must be finite, got {}", momentum)));
            }
        }
        if !self.smoothing_factor.is_finite() || self.smoothing_factor < 0.0 {
            return Err(invalid(format!(
                "smoothing_factor must be finite and non-negative, got {}",
                self.smoothing_factor
            )));
        }
        if let ActivationFunction::LeakyReLU { alpha } = self.activation {
            if !alpha.is_finite() {
                return Err(invalid(format!("leaky_relu alpha must be finite, got {}", alpha)));
            }
        }
        Ok(())
    }

    /// The update rule these settings describe.
    pub fn optimizer(&self) -> Sgd {
        Sgd {
            learning_rate: self.learning_rate,
            momentum: self.momentum,
        }
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), DataError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file; absent fields keep their defaults.
    pub fn load_json(path: &str) -> Result<NetworkConfig, DataError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

fn invalid(reason: String) -> NetworkError {
    NetworkError::InvalidConfig { reason }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            learning_rate: Self::DEFAULT_LEARNING_RATE,
            momentum: None,
            smoothing_factor: Self::DEFAULT_SMOOTHING_FACTOR,
            activation: ActivationFunction::Tanh,
        }
    }
}
