use crate::activation::activation::ActivationFunction;
use crate::layers::dense::Layer;
use crate::optim::sgd::Sgd;
use crate::random::UniformSource;

/// Weighted edge from a unit to one unit of the next layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub weight: f64,
    /// Delta applied by the most recent update; read back when momentum is on.
    pub last_delta: f64,
}

impl Connection {
    pub fn new(weight: f64) -> Connection {
        Connection { weight, last_delta: 0.0 }
    }
}

/// A single node: one activation value plus the connections it feeds.
///
/// `outgoing[j]` is the connection to unit `j` of the next layer, so the
/// position of a unit inside its layer doubles as the index every unit of
/// the previous layer uses to reach it. That lookup goes through
/// [`Unit::connection_to`] only.
#[derive(Debug, Clone)]
pub struct Unit {
    activation: f64,
    outgoing: Vec<Connection>,
    position: usize,
    // Scratch; only meaningful between the gradient and update phases of a
    // single training step.
    gradient: f64,
}

impl Unit {
    /// Creates a unit with `outgoing_count` connections, each weight drawn
    /// from `[0, 1)`. Output-layer units pass `0`.
    pub fn new<R>(outgoing_count: usize, position: usize, rng: &mut R) -> Unit
    where
        R: UniformSource + ?Sized,
    {
        let outgoing = (0..outgoing_count)
            .map(|_| Connection::new(rng.uniform(0.0, 1.0)))
            .collect();

        Unit {
            activation: 0.0,
            outgoing,
            position,
            gradient: 0.0,
        }
    }

    pub fn activation(&self) -> f64 {
        self.activation
    }

    pub fn set_activation(&mut self, value: f64) {
        self.activation = value;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn outgoing(&self) -> &[Connection] {
        &self.outgoing
    }

    /// The connection feeding unit `target` of the next layer.
    ///
    /// # Panics
    /// Panics if `target` is not a non-bias position of the next layer.
    pub fn connection_to(&self, target: usize) -> &Connection {
        let len = self.outgoing.len();
        self.outgoing.get(target).unwrap_or_else(|| {
            panic!(
                "unit {} has {} outgoing connections, no connection to position {}",
                self.position, len, target
            )
        })
    }

    /// Mutable counterpart of [`Unit::connection_to`].
    pub fn connection_to_mut(&mut self, target: usize) -> &mut Connection {
        let len = self.outgoing.len();
        let position = self.position;
        self.outgoing.get_mut(target).unwrap_or_else(|| {
            panic!(
                "unit {} has {} outgoing connections, no connection to position {}",
                position, len, target
            )
        })
    }

    /// Recomputes this unit's activation from the previous layer, bias included.
    pub fn forward(&mut self, previous: &Layer, activation: ActivationFunction) {
        let sum = previous.weighted_sum(self.position);
        self.activation = activation.function(sum);
    }

    pub fn output_gradient(&mut self, target: f64, activation: ActivationFunction) {
        let delta = target - self.activation;
        self.gradient = delta * activation.derivative(self.activation);
    }

    pub fn hidden_gradient(&mut self, next: &Layer, activation: ActivationFunction) {
        let downstream: f64 = next
            .units()
            .iter()
            .map(|u| self.connection_to(u.position()).weight * u.gradient())
            .sum();
        self.gradient = downstream * activation.derivative(self.activation);
    }

    /// Updates every connection from `previous` (bias unit included) into
    /// this unit, using this unit's gradient.
    pub fn update_weights(&self, previous: &mut Layer, sgd: &Sgd) {
        for unit in previous.inputs_mut() {
            let input = unit.activation;
            sgd.step(unit.connection_to_mut(self.position), input, self.gradient);
        }
    }

    #[cfg(test)]
    pub(crate) fn set_gradient(&mut self, gradient: f64) {
        self.gradient = gradient;
    }
}
