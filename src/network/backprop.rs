use crate::activation::activation::sigmoid_derivative;
use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;
use crate::network::params::Parameters;
use crate::network::snapshot::ActivationSnapshot;
use crate::optim::sgd::Sgd;

/// Descent directions for one training step, laid out like `Parameters`.
///
/// `weights[l](j, k) = δ_{l+1}[j] · a_l[k]` and `biases[l] = Σ_j δ_{l+1}[j]`,
/// with `δ = -∂E/∂z` for the squared error `E = ½ Σ (target - output)²`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub weights: Vec<Matrix>,
    pub biases: Vec<f64>,
}

/// Computes the gradients of the last forward pass recorded in `snapshot`.
///
/// Every output neuron contributes, hidden deltas are pulled back through
/// `W[l]ᵀ`, and all deltas are taken from the weights as they were during
/// the forward pass.
pub fn compute_gradients(snapshot: &ActivationSnapshot, target: &[f64], params: &Parameters) -> Result<Gradients> {
    let layer_count = snapshot.layers.len();
    params.check_layer_count(layer_count)?;
    let output_layer = layer_count - 1;
    let output_width = snapshot.layers[output_layer].nodes.len();
    if target.len() != output_width {
        return Err(NetError::TargetWidth { expected: output_width, got: target.len() });
    }

    let transitions = params.transition_count();
    let mut weights = vec![Matrix::default(); transitions];
    let mut biases = vec![0.0; transitions];
    if transitions == 0 {
        return Ok(Gradients { weights, biases });
    }

    // Output deltas.
    let mut delta: Vec<f64> = snapshot.layers[output_layer].nodes.iter()
        .zip(target)
        .map(|(node, t)| (t - node.activation) * sigmoid_derivative(node.value))
        .collect();

    // Walk transitions from the output side down to the input layer.
    for l in (0..transitions).rev() {
        let matrix = &params.weights[l];
        let source = snapshot.activations(l);
        if matrix.shape() != (delta.len(), source.len()) {
            return Err(NetError::ShapeMismatch(format!(
                "transition {l} is {}x{} but layers are {} -> {}",
                matrix.rows,
                matrix.cols,
                source.len(),
                delta.len()
            )));
        }

        weights[l] = Matrix::outer(&delta, &source);
        biases[l] = delta.iter().sum();

        // The input layer has no delta of its own.
        if l > 0 {
            let pulled_back = matrix.transpose_mul_vec(&delta);
            delta = pulled_back.iter()
                .zip(snapshot.values(l))
                .map(|(err, z)| err * sigmoid_derivative(z))
                .collect();
        }
    }

    Ok(Gradients { weights, biases })
}

/// One backpropagation step: computes the gradients for `target` and applies
/// them to `params` with the given learning rate.
pub fn backpropagate(
    snapshot: &ActivationSnapshot,
    target: &[f64],
    params: &mut Parameters,
    learning_rate: f64,
) -> Result<()> {
    let gradients = compute_gradients(snapshot, target, params)?;
    Sgd::new(learning_rate)?.step(params, gradients)
}
