use rand::Rng;

use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

/// Weights and biases for every layer transition.
///
/// `weights[l]` feeds layer `l + 1` and has shape
/// `(topology[l + 1], topology[l])`. Each transition carries a single bias
/// shared by all of its destination neurons.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub weights: Vec<Matrix>,
    pub biases: Vec<f64>,
}

impl Parameters {
    /// Draws every weight and bias uniformly from `[-1, 1)`.
    ///
    /// Matrices are drawn before their transition's bias, transition by
    /// transition, so a seeded generator always yields the same network.
    pub fn random<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> Parameters {
        let mut weights = Vec::with_capacity(topology.transition_count());
        let mut biases = Vec::with_capacity(topology.transition_count());

        for (source, destination) in topology.transitions() {
            weights.push(Matrix::random(destination, source, rng));
            biases.push(rng.gen_range(-1.0..1.0));
        }

        Parameters { weights, biases }
    }

    /// Builds parameters from explicit values, checking them against `topology`.
    pub fn from_parts(topology: &Topology, weights: Vec<Matrix>, biases: Vec<f64>) -> Result<Parameters> {
        let params = Parameters { weights, biases };
        params.check_shape(topology)?;
        Ok(params)
    }

    pub fn check_shape(&self, topology: &Topology) -> Result<()> {
        let expected = topology.transition_count();
        if self.weights.len() != expected || self.biases.len() != expected {
            return Err(NetError::ShapeMismatch(format!(
                "expected {expected} transitions, got {} weight matrices and {} biases",
                self.weights.len(),
                self.biases.len()
            )));
        }
        for (l, (matrix, (source, destination))) in self.weights.iter().zip(topology.transitions()).enumerate() {
            if matrix.shape() != (destination, source) {
                return Err(NetError::ShapeMismatch(format!(
                    "transition {l} needs a {destination}x{source} matrix, got {}x{}",
                    matrix.rows, matrix.cols
                )));
            }
        }
        Ok(())
    }

    pub fn transition_count(&self) -> usize {
        self.weights.len()
    }

    /// Checks that there is one matrix and one bias per transition of a
    /// network with `layer_count` layers.
    pub fn check_layer_count(&self, layer_count: usize) -> Result<()> {
        if self.transition_count() + 1 != layer_count || self.biases.len() != self.transition_count() {
            return Err(NetError::ShapeMismatch(format!(
                "{} weight matrices and {} biases cannot drive {} layers",
                self.weights.len(),
                self.biases.len(),
                layer_count
            )));
        }
        Ok(())
    }
}
