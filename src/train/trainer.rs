use rand::Rng;
use tracing::{debug, info};

use crate::error::{NetError, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::network::params::Parameters;
use crate::network::snapshot::ActivationSnapshot;
use crate::network::topology::Topology;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Everything a training run produces.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    /// Snapshot of the final forward pass.
    pub snapshot: ActivationSnapshot,
    pub params: Parameters,
    pub history: Vec<EpochStats>,
}

impl TrainOutcome {
    pub fn final_loss(&self) -> Option<f64> {
        self.history.last().map(|stats| stats.mean_loss)
    }
}

/// Trains a freshly initialized network on `inputs` against one shared `target`.
///
/// Each epoch walks the input sequence in order and runs one forward pass
/// followed by one backpropagation step per element. With zero epochs the
/// network is only evaluated on the last input; an empty input sequence
/// records no epochs.
///
/// # Errors
/// Fails before touching the generator if any input or the target does not
/// fit `topology`, or if the learning rate is not finite and positive.
pub fn train_network<R: Rng + ?Sized>(
    inputs: &[Vec<f64>],
    target: &[f64],
    topology: &Topology,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainOutcome> {
    check_run(inputs, target, topology, config)?;

    let mut network = Network::new(topology.clone(), rng);
    let history = train_loop(&mut network, inputs, target, config)?;

    let (_, params, snapshot) = network.into_parts();
    Ok(TrainOutcome { snapshot, params, history })
}

/// Runs `config.epochs` passes over `inputs` on an existing network and
/// returns one `EpochStats` per completed epoch.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    target: &[f64],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    check_run(inputs, target, network.topology(), config)?;

    info!(
        topology = %network.topology(),
        samples = inputs.len(),
        epochs = config.epochs,
        learning_rate = config.learning_rate,
        "training started"
    );

    let mut history = Vec::new();

    // Nothing to fit without inputs; with zero epochs only evaluate.
    if config.epochs == 0 || inputs.is_empty() {
        if let Some(last) = inputs.last() {
            network.forward(last)?;
        }
        return Ok(history);
    }

    for epoch in 1..=config.epochs {
        let mut total_loss = 0.0;

        for input in inputs {
            let output = network.forward(input)?;
            total_loss += MseLoss::loss(&output, target);
            network.backpropagate(target, config.learning_rate)?;
        }

        let mean_loss = total_loss / inputs.len() as f64;
        debug!(epoch, mean_loss, "epoch finished");

        history.push(EpochStats { epoch, total_epochs: config.epochs, mean_loss });
    }

    info!(final_loss = history.last().map(|s| s.mean_loss), "training finished");
    Ok(history)
}

fn check_run(inputs: &[Vec<f64>], target: &[f64], topology: &Topology, config: &TrainConfig) -> Result<()> {
    config.validate()?;
    if target.len() != topology.output_size() {
        return Err(NetError::TargetWidth { expected: topology.output_size(), got: target.len() });
    }
    if let Some(bad) = inputs.iter().find(|input| input.len() != topology.input_size()) {
        return Err(NetError::InputWidth { expected: topology.input_size(), got: bad.len() });
    }
    Ok(())
}
