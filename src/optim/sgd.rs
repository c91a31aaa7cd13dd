use crate::error::{NetError, Result};
use crate::network::backprop::Gradients;
use crate::network::params::Parameters;

#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Result<Sgd> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(NetError::InvalidLearningRate(learning_rate));
        }
        Ok(Sgd { learning_rate })
    }

    /// Moves every parameter `learning_rate` along its descent direction.
    ///
    /// `params` is left untouched when `gradients` is laid out differently.
    pub fn step(&self, params: &mut Parameters, gradients: Gradients) -> Result<()> {
        if gradients.weights.len() != params.weights.len() || gradients.biases.len() != params.biases.len() {
            return Err(NetError::ShapeMismatch(format!(
                "gradients for {} matrices and {} biases, parameters have {} and {}",
                gradients.weights.len(),
                gradients.biases.len(),
                params.weights.len(),
                params.biases.len()
            )));
        }
        if let Some(l) = (0..params.weights.len()).find(|&l| params.weights[l].shape() != gradients.weights[l].shape()) {
            return Err(NetError::ShapeMismatch(format!(
                "gradient {l} is {:?}, weights are {:?}",
                gradients.weights[l].shape(),
                params.weights[l].shape()
            )));
        }

        let lr = self.learning_rate;
        for (weights, grad) in params.weights.iter_mut().zip(gradients.weights) {
            *weights = std::mem::take(weights) + grad.map(|x| x * lr);
        }
        for (bias, grad) in params.biases.iter_mut().zip(gradients.biases) {
            *bias += lr * grad;
        }
        Ok(())
    }
}
