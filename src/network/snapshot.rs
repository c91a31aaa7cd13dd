use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::network::topology::Topology;

/// One neuron's state after a forward pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronData {
    pub id: String,
    /// Pre-activation weighted sum (raw input for layer 0).
    pub value: f64,
    pub activation: f64,
}

/// A directed edge between two neuron ids, as drawn by the graph view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    pub nodes: Vec<NeuronData>,
    /// Incoming links from the previous layer; empty for the input layer.
    pub links: Vec<Link>,
}

/// Per-layer neuron records for one forward pass.
///
/// Serializes to `{"layers": [{"nodes": [...], "links": [...]}, ...]}`,
/// the shape the graph front end consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationSnapshot {
    pub layers: Vec<LayerData>,
}

pub fn neuron_id(layer: usize, neuron: usize) -> String {
    format!("{layer}-{neuron}")
}

impl ActivationSnapshot {
    /// Zeroed snapshot with one layer per topology entry and one node per neuron.
    pub fn new(topology: &Topology) -> ActivationSnapshot {
        let layers = topology.layers().iter().enumerate()
            .map(|(l, &size)| {
                let nodes = (0..size)
                    .map(|n| NeuronData { id: neuron_id(l, n), value: 0.0, activation: 0.0 })
                    .collect();

                let links = if l == 0 {
                    Vec::new()
                } else {
                    let previous = topology.layers()[l - 1];
                    (0..size)
                        .flat_map(|target| (0..previous).map(move |source| (source, target)))
                        .map(|(source, target)| Link {
                            source: neuron_id(l - 1, source),
                            target: neuron_id(l, target),
                        })
                        .collect()
                };

                LayerData { nodes, links }
            })
            .collect();

        ActivationSnapshot { layers }
    }

    /// Fails unless this snapshot was built for `topology`.
    pub fn check_shape(&self, topology: &Topology) -> Result<()> {
        let widths: Vec<usize> = self.layers.iter().map(|layer| layer.nodes.len()).collect();
        if widths != topology.layers() {
            return Err(NetError::ShapeMismatch(format!(
                "snapshot layers {widths:?} do not match topology {topology}"
            )));
        }
        Ok(())
    }

    pub fn activations(&self, layer: usize) -> Vec<f64> {
        self.layers[layer].nodes.iter().map(|n| n.activation).collect()
    }

    pub fn values(&self, layer: usize) -> Vec<f64> {
        self.layers[layer].nodes.iter().map(|n| n.value).collect()
    }

    /// Activations of the last layer.
    pub fn output(&self) -> Vec<f64> {
        self.layers.last().map_or_else(Vec::new, |layer| {
            layer.nodes.iter().map(|n| n.activation).collect()
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
