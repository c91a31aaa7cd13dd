use crate::activation::activation::sigmoid;
use crate::error::{NetError, Result};
use crate::network::params::Parameters;
use crate::network::snapshot::ActivationSnapshot;

/// Runs one forward pass, overwriting `snapshot` in place.
///
/// Layer 0 takes the raw input as both value and activation. Every later
/// neuron `j` of layer `i` gets `value = W[i-1]·a(i-1) + bias[i-1]` and
/// `activation = sigmoid(value)`.
pub fn feed_forward(snapshot: &mut ActivationSnapshot, input: &[f64], params: &Parameters) -> Result<()> {
    params.check_layer_count(snapshot.layers.len())?;
    let input_layer = &mut snapshot.layers[0];
    if input.len() != input_layer.nodes.len() {
        return Err(NetError::InputWidth { expected: input_layer.nodes.len(), got: input.len() });
    }

    for (node, &x) in input_layer.nodes.iter_mut().zip(input) {
        node.value = x;
        node.activation = x;
    }

    for i in 1..snapshot.layers.len() {
        let weights = &params.weights[i - 1];
        let previous = snapshot.activations(i - 1);
        if weights.shape() != (snapshot.layers[i].nodes.len(), previous.len()) {
            return Err(NetError::ShapeMismatch(format!(
                "transition {} is {}x{} but layers are {} -> {}",
                i - 1,
                weights.rows,
                weights.cols,
                previous.len(),
                snapshot.layers[i].nodes.len()
            )));
        }

        let sums = weights.mul_vec(&previous);
        for (node, sum) in snapshot.layers[i].nodes.iter_mut().zip(sums) {
            let sum = sum + params.biases[i - 1];
            node.value = sum;
            node.activation = sigmoid(sum);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;
    use crate::network::topology::Topology;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn identity_weights_pass_input_through_sigmoid() {
        let topology = Topology::new(vec![2, 2]).unwrap();
        let params = Parameters::from_parts(&topology, vec![Matrix::identity(2)], vec![0.0]).unwrap();
        let mut snapshot = ActivationSnapshot::new(&topology);

        feed_forward(&mut snapshot, &[1.0, 1.0], &params).unwrap();

        for node in &snapshot.layers[1].nodes {
            assert_abs_diff_eq!(node.value, 1.0);
            assert_abs_diff_eq!(node.activation, sigmoid(1.0));
        }
        assert_abs_diff_eq!(snapshot.layers[0].nodes[1].value, 1.0);
    }

    #[test]
    fn bias_is_shared_by_the_whole_layer() {
        let topology = Topology::new(vec![2, 3]).unwrap();
        let params = Parameters::from_parts(&topology, vec![Matrix::zeros(3, 2)], vec![0.75]).unwrap();
        let mut snapshot = ActivationSnapshot::new(&topology);

        feed_forward(&mut snapshot, &[5.0, -5.0], &params).unwrap();

        for node in &snapshot.layers[1].nodes {
            assert_abs_diff_eq!(node.value, 0.75);
        }
    }

    #[test]
    fn rectangular_layers_use_destination_source_indexing() {
        let topology = Topology::new(vec![3, 2, 1]).unwrap();
        let w0 = Matrix::from_data(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 0.0, 2.0],
        ]).unwrap();
        let w1 = Matrix::from_data(vec![vec![1.0, -1.0]]).unwrap();
        let params = Parameters::from_parts(&topology, vec![w0, w1], vec![0.0, 0.5]).unwrap();
        let mut snapshot = ActivationSnapshot::new(&topology);

        feed_forward(&mut snapshot, &[0.1, 0.2, 0.3], &params).unwrap();

        assert_abs_diff_eq!(snapshot.layers[1].nodes[0].value, 0.1);
        assert_abs_diff_eq!(snapshot.layers[1].nodes[1].value, 0.6, epsilon = 1e-12);
        let expected = sigmoid(0.1) - sigmoid(0.6) + 0.5;
        assert_abs_diff_eq!(snapshot.layers[2].nodes[0].value, expected, epsilon = 1e-12);
    }

    #[test]
    fn repeated_pass_is_identical() {
        let topology = Topology::new(vec![3, 4, 2]).unwrap();
        let params = Parameters::random(&topology, &mut StdRng::seed_from_u64(3));
        let mut first = ActivationSnapshot::new(&topology);
        let mut second = ActivationSnapshot::new(&topology);

        feed_forward(&mut first, &[0.2, -0.4, 0.9], &params).unwrap();
        feed_forward(&mut second, &[0.2, -0.4, 0.9], &params).unwrap();
        assert_eq!(first, second);

        feed_forward(&mut first, &[0.2, -0.4, 0.9], &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn wrong_input_width_is_an_error() {
        let topology = Topology::new(vec![3, 1]).unwrap();
        let params = Parameters::random(&topology, &mut StdRng::seed_from_u64(3));
        let mut snapshot = ActivationSnapshot::new(&topology);

        let err = feed_forward(&mut snapshot, &[1.0, 2.0], &params).unwrap_err();
        assert!(matches!(err, NetError::InputWidth { expected: 3, got: 2 }));
    }

    #[test]
    fn mismatched_parameters_are_an_error() {
        let snapshot_topology = Topology::new(vec![2, 2, 1]).unwrap();
        let params_topology = Topology::new(vec![2, 1]).unwrap();
        let params = Parameters::random(&params_topology, &mut StdRng::seed_from_u64(3));
        let mut snapshot = ActivationSnapshot::new(&snapshot_topology);

        let err = feed_forward(&mut snapshot, &[1.0, 2.0], &params).unwrap_err();
        assert!(matches!(err, NetError::ShapeMismatch(_)));
    }

    #[test]
    fn missing_bias_is_an_error() {
        let topology = Topology::new(vec![2, 2]).unwrap();
        let params = Parameters { weights: vec![Matrix::zeros(2, 2)], biases: vec![] };
        let mut snapshot = ActivationSnapshot::new(&topology);

        let err = feed_forward(&mut snapshot, &[1.0, 2.0], &params).unwrap_err();
        assert!(matches!(err, NetError::ShapeMismatch(_)));
    }

    #[test]
    fn single_layer_network_copies_input() {
        let topology = Topology::new(vec![2]).unwrap();
        let params = Parameters::random(&topology, &mut StdRng::seed_from_u64(3));
        let mut snapshot = ActivationSnapshot::new(&topology);

        feed_forward(&mut snapshot, &[0.3, 0.7], &params).unwrap();
        assert_eq!(snapshot.output(), vec![0.3, 0.7]);
    }
}
