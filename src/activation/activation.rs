use serde::{Serialize, Deserialize};

/// Transfer function applied by every non-input unit, paired with its
/// derivative.
///
/// The derivative takes the unit's *output* `y = f(x)`, not the weighted sum,
/// because that is the only value a unit keeps after the forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivationFunction {
    /// Output range `(-1, 1)`; derivative `1 - y²`.
    #[default]
    Tanh,
    /// Same transfer as `Tanh` but with the derivative written as
    /// `1 - tanh(y²)`. Not the true derivative; kept so runs can be compared
    /// against networks trained with that form.
    TanhLegacyDerivative,
    #[serde(rename = "relu")]
    ReLU,
    #[serde(rename = "leaky_relu")]
    LeakyReLU { alpha: f64 },
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh | ActivationFunction::TanhLegacyDerivative => x.tanh(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }

    /// Derivative of the activation, expressed in terms of the output `y`.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => 1.0 - y * y,
            ActivationFunction::TanhLegacyDerivative => 1.0 - (y * y).tanh(),
            ActivationFunction::ReLU => if y > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if y > 0.0 { 1.0 } else { *alpha },
        }
    }
}
