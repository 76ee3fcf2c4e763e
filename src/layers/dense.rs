use std::iter;

use crate::layers::unit::Unit;
use crate::random::UniformSource;

/// One fully-connected layer: `size` regular units followed by a bias unit.
///
/// The bias unit is stored apart from the regular units. Its activation is
/// `1.0` for its whole lifetime and it never receives a gradient or an
/// incoming weight update, but it does feed the next layer through its own
/// outgoing connections.
#[derive(Debug, Clone)]
pub struct Layer {
    units: Vec<Unit>,
    bias: Unit,
}

impl Layer {
    /// Builds `size` units at positions `0..size` and a bias unit at position
    /// `size`, each with `outgoing_count` connections.
    pub fn new<R>(size: usize, outgoing_count: usize, rng: &mut R) -> Layer
    where
        R: UniformSource + ?Sized,
    {
        let units = (0..size)
            .map(|position| Unit::new(outgoing_count, position, rng))
            .collect();
        let mut bias = Unit::new(outgoing_count, size, rng);
        bias.set_activation(1.0);

        Layer { units, bias }
    }

    /// Number of regular (non-bias) units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn bias(&self) -> &Unit {
        &self.bias
    }

    /// Every unit that feeds the next layer: the regular units, then the bias.
    pub fn inputs(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().chain(iter::once(&self.bias))
    }

    /// Connection count of each unit in this layer.
    pub fn outgoing_len(&self) -> usize {
        self.bias.outgoing().len()
    }

    pub fn activations(&self) -> Vec<f64> {
        self.units.iter().map(Unit::activation).collect()
    }

    /// `Σ u.activation * u.connection_to(target).weight` over every input,
    /// bias included.
    pub fn weighted_sum(&self, target: usize) -> f64 {
        self.inputs()
            .map(|u| u.activation() * u.connection_to(target).weight)
            .sum()
    }

    /// Writes `values` into the regular units, in position order.
    pub(crate) fn latch(&mut self, values: &[f64]) {
        for (unit, &value) in self.units.iter_mut().zip(values) {
            unit.set_activation(value);
        }
    }

    pub(crate) fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    pub(crate) fn inputs_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut().chain(iter::once(&mut self.bias))
    }

    #[cfg(test)]
    pub(crate) fn bias_mut(&mut self) -> &mut Unit {
        &mut self.bias
    }
}
