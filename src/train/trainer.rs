use crate::{
    error::NetworkError,
    network::network::Network,
};

/// Runs one online pass over `inputs`/`targets` (one weight update per
/// sample, in order) and returns the mean per-sample RMS error.
///
/// Both slices must hold the same number of rows.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64, NetworkError> {
    if inputs.len() != targets.len() {
        return Err(NetworkError::SampleCountMismatch {
            inputs: inputs.len(),
            targets: targets.len(),
        });
    }

    let mut total_error = 0.0;
    let mut count = 0;

    for (input, target) in inputs.iter().zip(targets.iter()) {
        network.feed_forward(input)?;
        network.train(target)?;
        total_error += network.current_error();
        count += 1;
    }

    if count == 0 {
        return Ok(0.0);
    }
    Ok(total_error / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::config::NetworkConfig;
    use crate::random::seeded;

    #[test]
    fn mean_error_drops_over_passes() {
        let inputs = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]];
        let mut net = Network::new(&[2, 3, 1], NetworkConfig::default(), &mut seeded(8)).unwrap();

        let first = train_network(&mut net, &inputs, &targets).unwrap();
        let mut last = first;
        for _ in 0..500 {
            last = train_network(&mut net, &inputs, &targets).unwrap();
        }
        assert!(last < first);
    }

    #[test]
    fn empty_pass_is_zero() {
        let mut net = Network::new(&[1, 1], NetworkConfig::default(), &mut seeded(8)).unwrap();
        assert_eq!(train_network(&mut net, &[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn row_counts_must_match() {
        let mut net = Network::new(&[1, 1], NetworkConfig::default(), &mut seeded(8)).unwrap();
        let before = net.clone();
        let err = train_network(&mut net, &[vec![1.0], vec![0.0]], &[vec![1.0]]).unwrap_err();
        assert_eq!(err, NetworkError::SampleCountMismatch { inputs: 2, targets: 1 });
        // Nothing was trained.
        assert_eq!(
            net.layers()[0].units()[0].connection_to(0).weight,
            before.layers()[0].units()[0].connection_to(0).weight
        );
    }

    #[test]
    fn bad_shapes_surface() {
        let mut net = Network::new(&[1, 1], NetworkConfig::default(), &mut seeded(8)).unwrap();
        let err = train_network(&mut net, &[vec![1.0]], &[vec![1.0, 0.0]]).unwrap_err();
        assert_eq!(err, NetworkError::TargetSizeMismatch { expected: 1, actual: 2 });
    }
}
