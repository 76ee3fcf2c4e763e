use std::env;

use clap::Parser;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format;

use self::cli::args::{Args, Command};
use self::cli::generate::run_generate;
use self::cli::train::run_train;

mod cli;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    let event_format = format().with_target(false).without_time();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .event_format(event_format)
        .init();

    match args.command {
        Command::Train(config) => run_train(config),
        Command::Generate(config) => run_generate(config),
    }
}
