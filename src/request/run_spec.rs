use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::network::topology::Topology;
use crate::request::run_request::RunRequest;
use crate::train::train_config::TrainConfig;

/// A complete run stored as JSON: what to train and, optionally, how.
///
/// ```json
/// { "topology": [3, 2, 1],
///   "inputs": [[0.1, 0.2, 0.3]],
///   "target": [0.5],
///   "epochs": 200,
///   "seed": 7 }
/// ```
///
/// Hyperparameters left out fall back to whatever the caller supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    pub topology: Topology,
    pub inputs: Vec<Vec<f64>>,
    pub target: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epochs: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl RunSpec {
    pub fn from_request(request: RunRequest) -> RunSpec {
        RunSpec {
            topology: request.topology,
            inputs: request.inputs,
            target: request.target,
            epochs: None,
            learning_rate: None,
            seed: None,
        }
    }

    /// Checks every vector against the topology and splits off the request.
    pub fn request(&self) -> Result<RunRequest> {
        let expected = self.topology.output_size();
        if self.target.len() != expected {
            return Err(NetError::TargetWidth { expected, got: self.target.len() });
        }
        let width = self.topology.input_size();
        if let Some(bad) = self.inputs.iter().find(|input| input.len() != width) {
            return Err(NetError::InputWidth { expected: width, got: bad.len() });
        }
        Ok(RunRequest {
            topology: self.topology.clone(),
            inputs: self.inputs.clone(),
            target: self.target.clone(),
        })
    }

    /// Spec values override `fallback`.
    pub fn train_config(&self, fallback: TrainConfig) -> TrainConfig {
        TrainConfig {
            epochs: self.epochs.unwrap_or(fallback.epochs),
            learning_rate: self.learning_rate.unwrap_or(fallback.learning_rate),
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `RunSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<RunSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
