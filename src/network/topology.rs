use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// Layer widths from input to output.
///
/// The first entry is the input width and the last the output width; every
/// adjacent pair is one weighted transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology {
    layers: Vec<usize>,
}

impl Topology {
    /// Widest layer accepted.
    pub const MAX_LAYER_WIDTH: usize = 4096;
    /// Upper bound on neurons plus weights plus biases.
    pub const MAX_NETWORK_SIZE: usize = 1 << 20;

    pub fn new(layers: Vec<usize>) -> Result<Topology> {
        if layers.is_empty() {
            return Err(NetError::EmptyTopology);
        }
        if let Some(layer) = layers.iter().position(|&size| size == 0) {
            return Err(NetError::ZeroWidthLayer { layer });
        }
        if let Some(layer) = layers.iter().position(|&size| size > Self::MAX_LAYER_WIDTH) {
            return Err(NetError::TooLarge(format!(
                "layer {layer} has {} neurons, at most {} are allowed",
                layers[layer],
                Self::MAX_LAYER_WIDTH
            )));
        }
        match network_size(&layers) {
            Some(size) if size <= Self::MAX_NETWORK_SIZE => Ok(Topology { layers }),
            _ => Err(NetError::TooLarge(format!(
                "network needs more than {} neurons and parameters",
                Self::MAX_NETWORK_SIZE
            ))),
        }
    }

    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0]
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1]
    }

    /// `(source_size, destination_size)` for every transition.
    pub fn transitions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.layers.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn transition_count(&self) -> usize {
        self.layers.len() - 1
    }
}

/// Neurons plus one weight per connection plus one bias per transition;
/// `None` on overflow.
fn network_size(layers: &[usize]) -> Option<usize> {
    let neurons = layers.iter().try_fold(0usize, |acc, &size| acc.checked_add(size))?;
    layers.windows(2).try_fold(neurons, |acc, pair| {
        pair[0].checked_mul(pair[1])?.checked_add(1)?.checked_add(acc)
    })
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = NetError;

    fn try_from(layers: Vec<usize>) -> Result<Topology> {
        Topology::new(layers)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(topology: Topology) -> Vec<usize> {
        topology.layers
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let widths: Vec<String> = self.layers.iter().map(usize::to_string).collect();
        write!(f, "{}", widths.join("-"))
    }
}
