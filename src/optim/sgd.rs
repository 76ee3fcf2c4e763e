use crate::layers::unit::Connection;

/// Online gradient-descent update rule with optional momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
    /// Fraction of the previous delta added to the new one; `None` disables momentum.
    pub momentum: Option<f64>,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate, momentum: None }
    }

    pub fn with_momentum(mut self, momentum: f64) -> Sgd {
        self.momentum = Some(momentum);
        self
    }

    /// Applies one update to `connection`, whose source unit emitted `input`
    /// and whose target unit carries `gradient`.
    pub fn step(&self, connection: &mut Connection, input: f64, gradient: f64) {
        let mut delta = self.learning_rate * input * gradient;
        if let Some(momentum) = self.momentum {
            delta += momentum * connection.last_delta;
        }
        connection.weight += delta;
        connection.last_delta = delta;
    }
}
