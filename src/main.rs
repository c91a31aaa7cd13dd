//! rnn-graph: trains a small sigmoid network and prints the final
//! activation snapshot as JSON.
//!
//! Run with:
//!   cargo run --bin rnn-graph -- topology: 3 2 1 in: 0.1 0.2 0.3 out: 0.5
//! With no request tokens the built-in 3-2-1 example is trained.

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use rnn_graph::logging::setup_logging;
use rnn_graph::{train_network, RunRequest, RunSpec, TrainConfig};

#[derive(Parser)]
#[command(name = "rnn-graph")]
#[command(about = "Train a sigmoid network and dump its activations as JSON", long_about = None)]
struct Cli {
    /// Passes over the input sequence
    #[arg(long)]
    epochs: Option<usize>,

    /// Step size for each backpropagation update
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Seed for weight initialization (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON run spec; request tokens are ignored when given
    #[arg(long)]
    spec: Option<String>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// `topology: <widths…> in: <values…> out: <values…>`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    request: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let spec = match &cli.spec {
        Some(path) => RunSpec::load_json(path).with_context(|| format!("loading run spec {path}"))?,
        None if cli.request.is_empty() => RunSpec::from_request(RunRequest::example()),
        None => RunSpec::from_request(
            RunRequest::parse_tokens(&cli.request).context("invalid request")?,
        ),
    };
    let request = spec.request()?;

    let mut config = spec.train_config(TrainConfig::default());
    if let Some(epochs) = cli.epochs {
        config.epochs = epochs;
    }
    if let Some(learning_rate) = cli.learning_rate {
        config.learning_rate = learning_rate;
    }

    let mut rng = match cli.seed.or(spec.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let outcome = train_network(&request.inputs, &request.target, &request.topology, &config, &mut rng)?;
    info!(final_loss = outcome.final_loss(), "run complete");

    let json = if cli.compact {
        outcome.snapshot.to_json()?
    } else {
        outcome.snapshot.to_json_pretty()?
    };
    println!("{json}");

    Ok(())
}
