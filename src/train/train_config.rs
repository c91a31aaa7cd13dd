use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::optim::sgd::Sgd;

/// Hyperparameters for a `train_network` run.
///
/// # Fields
/// - `epochs`        — full passes over the input sequence
/// - `learning_rate` — step size for every backpropagation update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
}

impl TrainConfig {
    pub const DEFAULT_EPOCHS: usize = 1000;
    pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig { epochs, learning_rate }
    }

    /// Fails on a learning rate that is not finite and positive.
    pub fn validate(&self) -> Result<()> {
        Sgd::new(self.learning_rate).map(|_| ())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(Self::DEFAULT_EPOCHS, Self::DEFAULT_LEARNING_RATE)
    }
}
