use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ArgsTrait, Parser, Subcommand, ValueEnum};

use backprop_net::data::generator::{DEFAULT_HIDDEN_UNITS, DEFAULT_SAMPLE_COUNT};
use backprop_net::{ActivationFunction, LogicGate, NetworkConfig, TrainConfig};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Trains a network on a training-data file and prints per-sample progress.
    Train(TrainArgs),
    /// Writes labelled samples for a two-input logic gate.
    Generate(GenerateArgs),
}

#[derive(ArgsTrait, Clone, Debug)]
pub struct TrainArgs {
    /// Training data: a `topology:` line followed by `in:`/`out:` line pairs.
    pub file: PathBuf,

    /// JSON file with network settings. Flags below override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Step size of each weight update.
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Momentum applied to each connection's previous delta (e.g. 0.5). Off when absent.
    #[arg(long)]
    pub momentum: Option<f64>,

    /// Number of recent samples the smoothed error averages over.
    #[arg(long)]
    pub smoothing: Option<f64>,

    /// Transfer function of every non-input unit.
    #[arg(long, value_enum)]
    pub activation: Option<ActivationArg>,

    /// Seed for weight initialization. Seeded from the clock when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Passes required before convergence is checked.
    #[arg(long, default_value_t = TrainConfig::DEFAULT_MIN_SAMPLES)]
    pub min_samples: usize,

    /// Smoothed error below which training stops.
    #[arg(long, default_value_t = TrainConfig::DEFAULT_TARGET_ERROR)]
    pub target_error: f64,

    /// Hard cap on the number of passes.
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// Only print the summary and the final truth table.
    #[arg(short, long)]
    pub quiet: bool,
}

impl TrainArgs {
    /// Settings from `--config` (or defaults), with flags applied on top.
    pub fn network_config(&self) -> Result<NetworkConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let path = path.to_string_lossy();
                NetworkConfig::load_json(&path)
                    .with_context(|| format!("failed to load network config from {}", path))?
            }
            None => NetworkConfig::default(),
        };

        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }
        if let Some(momentum) = self.momentum {
            config.momentum = Some(momentum);
        }
        if let Some(smoothing) = self.smoothing {
            config.smoothing_factor = smoothing;
        }
        if let Some(activation) = self.activation {
            config.activation = activation.into();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn train_config(&self) -> TrainConfig {
        let config = TrainConfig::new(self.min_samples, self.target_error);
        match self.max_passes {
            Some(max) => config.with_max_passes(max),
            None => config,
        }
    }
}

#[derive(ArgsTrait, Clone, Debug)]
pub struct GenerateArgs {
    /// Gate to label samples with: and, or, no, xor.
    pub gate: LogicGate,

    /// Number of samples to write.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    pub samples: usize,

    /// Hidden units in the emitted topology line.
    #[arg(long, default_value_t = DEFAULT_HIDDEN_UNITS)]
    pub hidden: usize,

    /// Seed for input generation. Seeded from the clock when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file. Writes to stdout when absent.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ActivationArg {
    Tanh,
    /// tanh with the `1 - tanh(y²)` derivative.
    TanhLegacy,
    Relu,
    /// Leaky ReLU with slope 0.1 below zero.
    LeakyRelu,
}

impl From<ActivationArg> for ActivationFunction {
    fn from(arg: ActivationArg) -> Self {
        match arg {
            ActivationArg::Tanh => ActivationFunction::Tanh,
            ActivationArg::TanhLegacy => ActivationFunction::TanhLegacyDerivative,
            ActivationArg::Relu => ActivationFunction::ReLU,
            ActivationArg::LeakyRelu => ActivationFunction::LeakyReLU { alpha: 0.1 },
        }
    }
}
