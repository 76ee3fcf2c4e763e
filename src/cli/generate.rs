use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{ensure, Context, Result};
use tracing::info;

use backprop_net::data::generator::{gate_topology, generate_samples};
use backprop_net::random::{seeded, time_seeded};
use backprop_net::TrainingDataWriter;

use super::args::GenerateArgs;

pub fn run_generate(args: GenerateArgs) -> Result<()> {
    ensure!(args.hidden > 0, "--hidden must be at least 1");

    let mut rng = match args.seed {
        Some(seed) => seeded(seed),
        None => time_seeded(),
    };
    let samples = generate_samples(args.gate, args.samples, &mut rng);

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = TrainingDataWriter::new(BufWriter::new(out));
    writer
        .write_dataset(&gate_topology(args.hidden), &samples)
        .context("failed to write training data")?;

    info!(gate = %args.gate, samples = samples.len(), "samples written");
    Ok(())
}
