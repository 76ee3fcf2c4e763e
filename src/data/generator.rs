use std::fmt;
use std::str::FromStr;

use crate::data::sample::Sample;
use crate::error::DataError;
use crate::random::UniformSource;

pub const DEFAULT_SAMPLE_COUNT: usize = 2000;
pub const DEFAULT_HIDDEN_UNITS: usize = 4;

/// Two-input boolean function used to label generated samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicGate {
    And,
    Or,
    /// `!a & !b`, spelled `no` on the command line.
    Nor,
    Xor,
}

impl LogicGate {
    pub const ALL: [LogicGate; 4] = [LogicGate::And, LogicGate::Or, LogicGate::Nor, LogicGate::Xor];

    pub fn apply(&self, a: bool, b: bool) -> bool {
        match self {
            LogicGate::And => a & b,
            LogicGate::Or => a | b,
            LogicGate::Nor => !a & !b,
            LogicGate::Xor => a ^ b,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LogicGate::And => "and",
            LogicGate::Or => "or",
            LogicGate::Nor => "no",
            LogicGate::Xor => "xor",
        }
    }

    /// The four rows of the truth table as labelled samples, `0.0`/`1.0` encoded.
    pub fn truth_table(&self) -> Vec<Sample> {
        [(false, false), (false, true), (true, false), (true, true)]
            .iter()
            .map(|&(a, b)| sample(*self, a, b))
            .collect()
    }
}

impl fmt::Display for LogicGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicGate {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogicGate::ALL
            .iter()
            .copied()
            .find(|gate| gate.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DataError::UnknownGate(s.to_string()))
    }
}

/// Topology for a two-input, one-output gate network.
pub fn gate_topology(hidden: usize) -> Vec<usize> {
    vec![2, hidden, 1]
}

/// Draws `count` random input pairs and labels them with `gate`.
pub fn generate_samples<R>(gate: LogicGate, count: usize, rng: &mut R) -> Vec<Sample>
where
    R: UniformSource + ?Sized,
{
    (0..count)
        .map(|_| {
            let a = rng.uniform(0.0, 1.0).round() >= 1.0;
            let b = rng.uniform(0.0, 1.0).round() >= 1.0;
            sample(gate, a, b)
        })
        .collect()
}

fn sample(gate: LogicGate, a: bool, b: bool) -> Sample {
    let encode = |v: bool| if v { 1.0 } else { 0.0 };
    Sample::new(vec![encode(a), encode(b)], vec![encode(gate.apply(a, b))])
}
