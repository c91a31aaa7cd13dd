use rand::Rng;

use crate::error::Result;
use crate::network::backprop::backpropagate;
use crate::network::forward::feed_forward;
use crate::network::params::Parameters;
use crate::network::snapshot::ActivationSnapshot;
use crate::network::topology::Topology;

/// A topology together with its parameters and the snapshot of the most
/// recent forward pass.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    pub params: Parameters,
    snapshot: ActivationSnapshot,
}

impl Network {
    /// Randomly initialized network; the snapshot starts zeroed.
    pub fn new<R: Rng + ?Sized>(topology: Topology, rng: &mut R) -> Network {
        let params = Parameters::random(&topology, rng);
        let snapshot = ActivationSnapshot::new(&topology);
        Network { topology, params, snapshot }
    }

    pub fn with_parameters(topology: Topology, params: Parameters) -> Result<Network> {
        params.check_shape(&topology)?;
        let snapshot = ActivationSnapshot::new(&topology);
        Ok(Network { topology, params, snapshot })
    }

    /// Forward pass; returns the output layer's activations.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        feed_forward(&mut self.snapshot, input, &self.params)?;
        Ok(self.snapshot.output())
    }

    /// One gradient step against `target` using the last forward pass.
    pub fn backpropagate(&mut self, target: &[f64], learning_rate: f64) -> Result<()> {
        backpropagate(&self.snapshot, target, &mut self.params, learning_rate)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn snapshot(&self) -> &ActivationSnapshot {
        &self.snapshot
    }

    pub fn into_parts(self) -> (Topology, Parameters, ActivationSnapshot) {
        (self.topology, self.params, self.snapshot)
    }
}
