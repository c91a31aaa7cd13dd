use serde::{Serialize, Deserialize};

/// Per-epoch statistics recorded by `train_network`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean MSE of the forward outputs over the epoch's input sequence,
    /// measured before each sample's update.
    pub mean_loss: f64,
}
