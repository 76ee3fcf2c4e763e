use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use backprop_net::random::{seeded, time_seed};
use backprop_net::{
    train_loop, LogicGate, Network, SampleStats, StopReason, TrainingDataReader, TrainingSummary,
};

use super::args::TrainArgs;

pub fn run_train(args: TrainArgs) -> Result<()> {
    let network_config = args.network_config()?;
    let reader = TrainingDataReader::open(&args.file)
        .with_context(|| format!("failed to read training data from {}", args.file.display()))?;
    let topology = reader.topology().to_vec();

    let seed = args.seed.unwrap_or_else(time_seed);
    info!(seed, topology = ?topology, "building network");
    let mut network = Network::new(&topology, network_config, &mut seeded(seed))?;

    let summary = if args.quiet {
        train_loop(&mut network, reader, &args.train_config())?
    } else {
        let (tx, rx) = mpsc::channel();
        let train_config = args.train_config().with_progress(tx);

        // The sender lives in `train_config`, so `rx` closes when training ends.
        let handle = thread::spawn(move || {
            let summary = train_loop(&mut network, reader, &train_config);
            (network, summary)
        });
        for stats in rx {
            print_stats(&stats);
        }
        let (trained, summary) = handle
            .join()
            .map_err(|_| anyhow!("training thread panicked"))?;
        network = trained;
        summary?
    };

    print_summary(&summary);
    print_truth_table(&mut network)?;
    Ok(())
}

fn print_stats(stats: &SampleStats) {
    println!();
    println!("Pass {}", stats.pass);
    show_vector_vals("Inputs:", &stats.inputs);
    show_vector_vals("Outputs:", &stats.outputs);
    show_vector_vals("Targets:", &stats.targets);
    println!("Net current error: {}", stats.current_error);
    println!("Net recent average error: {}", stats.smoothed_error);
}

fn print_summary(summary: &TrainingSummary) {
    if summary.stop_reason == StopReason::Converged {
        println!();
        println!("average error acceptable -> break");
    }
    println!();
    println!("Done after {} passes (recent average error {:.4})", summary.passes, summary.smoothed_error);
}

/// Runs the four boolean input pairs through a two-input network.
fn print_truth_table(network: &mut Network) -> Result<()> {
    if network.layers().len() < 2 || network.input_len() != 2 {
        println!("Unexpected topology, no test");
        return Ok(());
    }

    println!("TEST");
    println!();
    // Any gate yields the same four input rows.
    for row in LogicGate::And.truth_table() {
        network.feed_forward(&row.inputs)?;
        show_vector_vals("Inputs:", &row.inputs);
        show_vector_vals("Outputs:", &network.read_outputs());
        println!();
    }
    println!("/TEST");
    Ok(())
}

fn show_vector_vals(prefix: &str, values: &[f64]) {
    let values: Vec<String> = values.iter().map(|v| format!("{:.2}", v)).collect();
    println!("{} {}", prefix, values.join(" "));
}
