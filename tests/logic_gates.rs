use backprop_net::data::generator::gate_topology;
use backprop_net::random::seeded;
use backprop_net::{
    train_loop, ActivationFunction, DataError, LogicGate, Network, NetworkConfig, Sample,
    StopReason, TrainConfig,
};

const MAX_PASSES: usize = 20_000;

/// Trains a 2-4-1 network on `gate`'s truth table, repeated in order, until
/// the default convergence policy is met.
fn train_gate(gate: LogicGate, config: NetworkConfig, seed: u64) -> Network {
    let mut network = Network::new(&gate_topology(4), config, &mut seeded(seed)).unwrap();
    let samples = gate.truth_table().into_iter().cycle().map(Ok::<Sample, DataError>);
    let summary = train_loop(
        &mut network,
        samples,
        &TrainConfig::default().with_max_passes(MAX_PASSES),
    )
    .unwrap();

    assert_eq!(
        summary.stop_reason,
        StopReason::Converged,
        "{gate} did not converge: {summary:?}"
    );
    assert!(summary.passes >= TrainConfig::DEFAULT_MIN_SAMPLES);
    assert!(network.smoothed_error() < 0.05);
    network
}

fn assert_separates(network: &mut Network, gate: LogicGate) {
    for row in gate.truth_table() {
        network.feed_forward(&row.inputs).unwrap();
        let output = network.read_outputs()[0];
        if row.targets[0] > 0.5 {
            assert!(output > 0.5, "{gate} {:?} -> {output}", row.inputs);
        } else {
            assert!(output < 0.5, "{gate} {:?} -> {output}", row.inputs);
        }
    }
}

#[test]
fn and_without_momentum() {
    let mut network = train_gate(LogicGate::And, NetworkConfig::default(), 1);
    assert_separates(&mut network, LogicGate::And);
}

#[test]
fn and_with_momentum() {
    let config = NetworkConfig::default().with_momentum(0.5);
    let mut network = train_gate(LogicGate::And, config, 2);
    assert_separates(&mut network, LogicGate::And);
}

#[test]
fn xor_without_momentum() {
    let mut network = train_gate(LogicGate::Xor, NetworkConfig::default(), 3);
    assert_separates(&mut network, LogicGate::Xor);
}

#[test]
fn xor_with_momentum() {
    let config = NetworkConfig::default().with_momentum(0.5);
    let mut network = train_gate(LogicGate::Xor, config, 4);
    assert_separates(&mut network, LogicGate::Xor);
}

#[test]
fn or_and_nor() {
    for (gate, seed) in [(LogicGate::Or, 5), (LogicGate::Nor, 6)] {
        let mut network = train_gate(gate, NetworkConfig::default(), seed);
        assert_separates(&mut network, gate);
    }
}

#[test]
fn legacy_derivative_still_learns() {
    let config = NetworkConfig::default().with_activation(ActivationFunction::TanhLegacyDerivative);
    for (gate, seed) in [(LogicGate::And, 7), (LogicGate::Xor, 8)] {
        let mut network = train_gate(gate, config, seed);
        assert_separates(&mut network, gate);
    }

    let with_momentum = config.with_momentum(0.5);
    let mut network = train_gate(LogicGate::Xor, with_momentum, 9);
    assert_separates(&mut network, LogicGate::Xor);
}

#[test]
fn xor_takes_longer_than_and() {
    // Averaged over several seeds; single runs can go either way.
    let passes = |gate: LogicGate| -> usize {
        (10..30)
            .map(|seed| {
                let mut network =
                    Network::new(&gate_topology(4), NetworkConfig::default(), &mut seeded(seed)).unwrap();
                let samples = gate.truth_table().into_iter().cycle().map(Ok::<Sample, DataError>);
                let config = TrainConfig::default().with_max_passes(MAX_PASSES);
                train_loop(&mut network, samples, &config).unwrap().passes
            })
            .sum()
    };
    assert!(passes(LogicGate::Xor) > passes(LogicGate::And));
}
