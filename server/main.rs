/// rnn-graph graph server
///
/// Answers the graph front end's `POST /graph` requests by training a network
/// in-process and returning its activation snapshot.
///
/// Run with:
///   cargo run --bin graph-server --release
/// Then point the front end at http://127.0.0.1:3001/graph

mod routes;
mod handlers;

use anyhow::{anyhow, Result};
use clap::Parser;
use tiny_http::Server;
use tracing::info;

use rnn_graph::logging::setup_logging;
use rnn_graph::TrainConfig;

#[derive(Parser)]
#[command(name = "graph-server")]
#[command(about = "Serve activation snapshots to the graph front end", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3001")]
    addr: String,

    /// Passes over the input sequence per request
    #[arg(long, default_value_t = TrainConfig::DEFAULT_EPOCHS)]
    epochs: usize,

    /// Step size for each backpropagation update
    #[arg(long, default_value_t = TrainConfig::DEFAULT_LEARNING_RATE)]
    learning_rate: f64,

    /// Log level used when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let config = TrainConfig::new(cli.epochs, cli.learning_rate);
    config.validate()?;

    let server = Server::http(&cli.addr)
        .map_err(|e| anyhow!("failed to bind {}: {e}", cli.addr))?;
    info!(addr = %cli.addr, epochs = config.epochs, learning_rate = config.learning_rate, "server is running");

    // Requests are short; serve them one at a time.
    for request in server.incoming_requests() {
        routes::dispatch(request, &config);
    }

    Ok(())
}
