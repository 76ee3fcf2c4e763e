use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::loss::rms::RmsLoss;
use crate::loss::smoothing::RecentAverage;
use crate::network::config::NetworkConfig;
use crate::random::UniformSource;

/// A fully-connected feedforward network trained one sample at a time.
///
/// Layer 0 is the input layer; its activations are latched by
/// [`Network::feed_forward`]. Every later layer computes its activations from
/// the one before it. Each layer ends with a bias unit pinned to `1.0`.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    config: NetworkConfig,
    current_error: f64,
    smoothed_error: RecentAverage,
    propagated: bool,
}

impl Network {
    /// Builds a network with one layer per `topology` entry, drawing every
    /// weight from `[0, 1)` with `rng`.
    pub fn new<R>(topology: &[usize], config: NetworkConfig, rng: &mut R) -> Result<Network>
    where
        R: UniformSource + ?Sized,
    {
        validate_topology(topology)?;
        config.validate()?;

        let layers: Vec<Layer> = topology.iter().enumerate()
            .map(|(i, &size)| {
                let outgoing_count = topology.get(i + 1).copied().unwrap_or(0);
                Layer::new(size, outgoing_count, rng)
            })
            .collect();

        let network = Network {
            layers,
            config,
            current_error: 0.0,
            smoothed_error: RecentAverage::new(config.smoothing_factor),
            propagated: false,
        };
        debug!(
            topology = ?topology,
            weights = network.weight_count(),
            learning_rate = config.learning_rate,
            momentum = ?config.momentum,
            "network constructed"
        );
        Ok(network)
    }

    /// Latches `inputs` into the input layer and propagates them forward.
    pub fn feed_forward(&mut self, inputs: &[f64]) -> Result<()> {
        let expected = self.input_len();
        if inputs.len() != expected {
            return Err(NetworkError::InputSizeMismatch { expected, actual: inputs.len() });
        }

        self.layers[0].latch(inputs);

        let activation = self.config.activation;
        for i in 1..self.layers.len() {
            let (before, after) = self.layers.split_at_mut(i);
            let previous = &before[i - 1];
            for unit in after[0].units_mut() {
                unit.forward(previous, activation);
            }
        }

        self.propagated = true;
        Ok(())
    }

    /// Backpropagates `targets` against the outputs of the last
    /// `feed_forward` and updates every weight once.
    pub fn train(&mut self, targets: &[f64]) -> Result<()> {
        let expected = self.output_len();
        if targets.len() != expected {
            return Err(NetworkError::TargetSizeMismatch { expected, actual: targets.len() });
        }
        if !self.propagated {
            return Err(NetworkError::NotPropagated);
        }

        self.record_error(targets);

        // A single-layer network has nothing to learn.
        if self.layers.len() < 2 {
            return Ok(());
        }
        self.compute_gradients(targets);
        self.update_weights();
        Ok(())
    }

    /// Activations of the output layer's regular units, in position order.
    pub fn read_outputs(&self) -> Vec<f64> {
        self.output_layer().activations()
    }

    /// RMS error of the most recent `train` call.
    pub fn current_error(&self) -> f64 {
        self.current_error
    }

    /// Running average of `current_error` across samples.
    pub fn smoothed_error(&self) -> f64 {
        self.smoothed_error.value()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Regular-unit count of every layer.
    pub fn topology(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::len).collect()
    }

    pub fn input_len(&self) -> usize {
        self.layers[0].len()
    }

    pub fn output_len(&self) -> usize {
        self.output_layer().len()
    }

    /// Total number of connections, bias connections included.
    pub fn weight_count(&self) -> usize {
        self.layers.iter()
            .map(|layer| (layer.len() + 1) * layer.outgoing_len())
            .sum()
    }

    fn output_layer(&self) -> &Layer {
        // At least one layer exists by construction.
        &self.layers[self.layers.len() - 1]
    }

    fn record_error(&mut self, targets: &[f64]) {
        let outputs = self.read_outputs();
        self.current_error = RmsLoss::loss(&outputs, targets);
        self.smoothed_error.push(self.current_error);
    }

    /// Output layer first, then hidden layers from last to first. The input
    /// layer never receives a gradient.
    fn compute_gradients(&mut self, targets: &[f64]) {
        let activation = self.config.activation;
        let last = self.layers.len() - 1;

        for (unit, &target) in self.layers[last].units_mut().iter_mut().zip(targets) {
            unit.output_gradient(target, activation);
        }

        for i in (1..last).rev() {
            let (before, after) = self.layers.split_at_mut(i + 1);
            let next = &after[0];
            for unit in before[i].units_mut() {
                unit.hidden_gradient(next, activation);
            }
        }
    }

    /// Walks from the output layer back to layer 1, reading only gradients
    /// set by `compute_gradients`.
    fn update_weights(&mut self) {
        let optimizer = self.config.optimizer();
        for i in (1..self.layers.len()).rev() {
            let (before, after) = self.layers.split_at_mut(i);
            let previous = &mut before[i - 1];
            for unit in after[0].units() {
                unit.update_weights(previous, &optimizer);
            }
        }
    }
}

/// Checks that `topology` has at least one layer and no empty layer.
pub fn validate_topology(topology: &[usize]) -> Result<()> {
    if topology.is_empty() {
        return Err(NetworkError::InvalidTopology {
            reason: "at least one layer is required".to_string(),
        });
    }
    if let Some(i) = topology.iter().position(|&size| size == 0) {
        return Err(NetworkError::InvalidTopology {
            reason: format!("layer {} has no units", i),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::random::seeded;

    const EPS: f64 = 1e-12;

    fn network(topology: &[usize]) -> Network {
        Network::new(topology, NetworkConfig::default(), &mut seeded(11)).unwrap()
    }

    #[test]
    fn rejects_empty_topology() {
        let err = Network::new(&[], NetworkConfig::default(), &mut seeded(0)).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidTopology { .. }));
    }

    #[test]
    fn rejects_empty_layer() {
        let err = Network::new(&[2, 0, 1], NetworkConfig::default(), &mut seeded(0)).unwrap_err();
        assert_eq!(err, NetworkError::InvalidTopology { reason: "layer 1 has no units".to_string() });
    }

    #[test]
    fn rejects_invalid_config() {
        let config = NetworkConfig::default().with_smoothing_factor(-1.0);
        let err = Network::new(&[2, 2, 1], config, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidConfig { .. }));
    }

    #[test]
    fn smoothed_error_stays_finite_with_zero_smoothing() {
        let config = NetworkConfig::default().with_smoothing_factor(0.0);
        let mut net = Network::new(&[2, 2, 1], config, &mut seeded(4)).unwrap();
        net.feed_forward(&[1.0, 0.0]).unwrap();
        net.train(&[0.0]).unwrap();
        assert!(net.smoothed_error().is_finite());
        assert_eq!(net.smoothed_error(), net.current_error());
    }

    #[test]
    fn layer_shapes_follow_topology() {
        let net = network(&[3, 5, 2]);
        assert_eq!(net.topology(), vec![3, 5, 2]);
        assert_eq!(net.layers()[0].outgoing_len(), 5);
        assert_eq!(net.layers()[1].outgoing_len(), 2);
        assert_eq!(net.layers()[2].outgoing_len(), 0);
        // (3 + 1) * 5 + (5 + 1) * 2
        assert_eq!(net.weight_count(), 32);
        for layer in net.layers() {
            assert_eq!(layer.bias().activation(), 1.0);
        }
    }

    #[test]
    fn input_size_is_checked() {
        let mut net = network(&[2, 3, 1]);
        assert_eq!(
            net.feed_forward(&[1.0]),
            Err(NetworkError::InputSizeMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn target_size_is_checked() {
        let mut net = network(&[2, 3, 1]);
        net.feed_forward(&[1.0, 0.0]).unwrap();
        assert_eq!(
            net.train(&[1.0, 0.0]),
            Err(NetworkError::TargetSizeMismatch { expected: 1, actual: 2 })
        );
    }

    #[test]
    fn train_requires_forward_pass() {
        let mut net = network(&[2, 3, 1]);
        assert_eq!(net.train(&[1.0]), Err(NetworkError::NotPropagated));
    }

    #[test]
    fn input_layer_is_latched_verbatim() {
        let mut net = network(&[2, 2]);
        net.feed_forward(&[0.3, -0.6]).unwrap();
        assert_eq!(net.layers()[0].activations(), vec![0.3, -0.6]);
    }

    #[test]
    fn forward_matches_hand_computation() {
        let mut net = network(&[2, 1]);
        net.feed_forward(&[1.0, 0.5]).unwrap();
        let input = &net.layers()[0];
        let sum = 1.0 * input.units()[0].connection_to(0).weight
            + 0.5 * input.units()[1].connection_to(0).weight
            + 1.0 * input.bias().connection_to(0).weight;
        assert!((net.read_outputs()[0] - sum.tanh()).abs() < EPS);
    }

    #[test]
    fn error_is_rms_and_smoothed() {
        let mut net = network(&[2, 3, 2]);
        net.feed_forward(&[1.0, 0.0]).unwrap();
        let out = net.read_outputs();
        net.train(&[0.0, 1.0]).unwrap();

        let expected = ((out[0].powi(2) + (1.0 - out[1]).powi(2)) / 2.0).sqrt();
        assert!((net.current_error() - expected).abs() < EPS);
        assert!((net.smoothed_error() - expected / 101.0).abs() < EPS);
    }

    #[test]
    fn exact_targets_give_zero_error() {
        let mut net = network(&[1, 2, 1]);
        net.feed_forward(&[0.5]).unwrap();
        let out = net.read_outputs();
        net.train(&out).unwrap();
        assert_eq!(net.current_error(), 0.0);
    }

    #[test]
    fn single_step_matches_manual_backprop() {
        let config = NetworkConfig::default().with_learning_rate(0.5);
        let mut net = Network::new(&[1, 1, 1], config, &mut seeded(5)).unwrap();
        let before = net.clone();

        net.feed_forward(&[1.0]).unwrap();
        net.train(&[0.0]).unwrap();

        let w = |n: &Network, layer: usize, bias: bool| {
            let l = &n.layers()[layer];
            let unit = if bias { l.bias() } else { &l.units()[0] };
            unit.connection_to(0).weight
        };

        let (w0, b0, w1, b1) = (w(&before, 0, false), w(&before, 0, true), w(&before, 1, false), w(&before, 1, true));
        let h = (1.0 * w0 + b0).tanh();
        let o = (h * w1 + b1).tanh();
        let g_out = (0.0 - o) * (1.0 - o * o);
        let g_hidden = w1 * g_out * (1.0 - h * h);

        assert!((w(&net, 1, false) - (w1 + 0.5 * h * g_out)).abs() < EPS);
        assert!((w(&net, 1, true) - (b1 + 0.5 * g_out)).abs() < EPS);
        assert!((w(&net, 0, false) - (w0 + 0.5 * g_hidden)).abs() < EPS);
        assert!((w(&net, 0, true) - (b0 + 0.5 * g_hidden)).abs() < EPS);
    }

    #[test]
    fn momentum_reuses_previous_delta() {
        let config = NetworkConfig::default().with_momentum(0.5);
        let mut with = Network::new(&[1, 1], config, &mut seeded(3)).unwrap();
        let mut without = Network::new(&[1, 1], NetworkConfig::default(), &mut seeded(3)).unwrap();

        for net in [&mut with, &mut without] {
            for _ in 0..2 {
                net.feed_forward(&[1.0]).unwrap();
                net.train(&[-1.0]).unwrap();
            }
        }

        let delta = |n: &Network| n.layers()[0].units()[0].connection_to(0).last_delta;
        assert_ne!(delta(&with), delta(&without));
    }

    #[test]
    fn bias_survives_training() {
        let mut net = network(&[2, 4, 3, 1]);
        for _ in 0..20 {
            net.feed_forward(&[1.0, -1.0]).unwrap();
            net.train(&[0.5]).unwrap();
        }
        for layer in net.layers() {
            assert_eq!(layer.bias().activation(), 1.0);
        }
    }

    #[test]
    fn single_layer_network_passes_inputs_through() {
        let mut net = network(&[3]);
        net.feed_forward(&[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(net.read_outputs(), vec![0.1, 0.2, 0.3]);
        net.train(&[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(net.current_error(), 0.0);
        assert_eq!(net.weight_count(), 0);
    }

    #[test]
    fn activation_choice_is_honoured() {
        let config = NetworkConfig::default().with_activation(ActivationFunction::ReLU);
        let mut net = Network::new(&[1, 1], config, &mut seeded(2)).unwrap();
        net.feed_forward(&[-3.0]).unwrap();
        let sum = net.layers()[0].weighted_sum(0);
        assert_eq!(net.read_outputs(), vec![sum.max(0.0)]);
    }
}
