use approx::assert_abs_diff_eq;
use rand::{rngs::StdRng, SeedableRng};

use rnn_graph::network::{feed_forward, backpropagate};
use rnn_graph::{
    sigmoid, train_network, ActivationSnapshot, Matrix, Network, Parameters, RunRequest,
    Topology, TrainConfig,
};

#[test]
fn example_request_trains_toward_target() {
    let request = RunRequest::example();
    let config = TrainConfig::default();
    let outcome = train_network(
        &request.inputs,
        &request.target,
        &request.topology,
        &config,
        &mut StdRng::seed_from_u64(2024),
    )
    .unwrap();

    assert_eq!(outcome.history.len(), config.epochs);
    assert!(outcome.final_loss().unwrap() < outcome.history[0].mean_loss);
    assert_abs_diff_eq!(outcome.snapshot.output()[0], 0.5, epsilon = 0.05);

    let json: serde_json::Value = serde_json::from_str(&outcome.snapshot.to_json().unwrap()).unwrap();
    assert_eq!(json["layers"].as_array().unwrap().len(), 3);
}

#[test]
fn token_request_matches_equivalent_example() {
    let tokens: Vec<String> = "topology: 3 2 1 in: 0.1 0.2 0.3 0.4 0.5 0.6 0.7 0.8 0.9 out: 0.5"
        .split(' ')
        .map(str::to_owned)
        .collect();
    let parsed = RunRequest::parse_tokens(&tokens).unwrap();
    assert_eq!(parsed, RunRequest::example());

    let config = TrainConfig::new(50, 0.2);
    let a = train_network(&parsed.inputs, &parsed.target, &parsed.topology, &config, &mut StdRng::seed_from_u64(3)).unwrap();
    let example = RunRequest::example();
    let b = train_network(&example.inputs, &example.target, &example.topology, &config, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(a.snapshot, b.snapshot);
}

#[test]
fn manual_forward_and_backward_steps() {
    let topology = Topology::new(vec![2, 2]).unwrap();
    let mut params = Parameters::from_parts(&topology, vec![Matrix::identity(2)], vec![0.0]).unwrap();
    let mut snapshot = ActivationSnapshot::new(&topology);

    feed_forward(&mut snapshot, &[1.0, 1.0], &params).unwrap();
    assert_abs_diff_eq!(snapshot.output()[0], sigmoid(1.0));
    assert_abs_diff_eq!(snapshot.output()[1], sigmoid(1.0));

    backpropagate(&snapshot, &[1.0, 1.0], &mut params, 1.0).unwrap();
    assert!(params.weights[0][(0, 0)] > 1.0);
    assert!(params.weights[0][(1, 0)] > 0.0);
    assert!(params.biases[0] > 0.0);

    let before = snapshot.output();
    feed_forward(&mut snapshot, &[1.0, 1.0], &params).unwrap();
    assert!(snapshot.output()[0] > before[0]);
}

#[test]
fn deep_uneven_network_learns_two_outputs() {
    let topology = Topology::new(vec![2, 5, 3, 2]).unwrap();
    let mut network = Network::new(topology, &mut StdRng::seed_from_u64(17));
    let target = [0.2, 0.8];

    let start = network.forward(&[0.5, -0.5]).unwrap();
    for _ in 0..2000 {
        network.forward(&[0.5, -0.5]).unwrap();
        network.backpropagate(&target, 0.5).unwrap();
    }
    let end = network.forward(&[0.5, -0.5]).unwrap();

    let err = |out: &[f64]| out.iter().zip(&target).map(|(o, t)| (o - t).abs()).sum::<f64>();
    assert!(err(&end) < err(&start));
    assert!(err(&end) < 0.05);
}
