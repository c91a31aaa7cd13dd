pub mod error;
pub mod logging;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod request;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::{sigmoid, sigmoid_derivative};
pub use network::{ActivationSnapshot, Network, Parameters, Topology};
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use request::{RunRequest, RunSpec};
pub use train::{train_network, EpochStats, TrainConfig, TrainOutcome};
