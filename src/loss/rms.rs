pub struct RmsLoss;

impl RmsLoss {
    /// Root-mean-square error: sqrt(mean((expected - predicted)²))
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        let squared = predicted.iter().zip(expected.iter())
            .map(|(p, y)| (y - p).powi(2))
            .sum::<f64>() / n;
        squared.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_for_exact_match() {
        assert_eq!(RmsLoss::loss(&[0.5, -0.25], &[0.5, -0.25]), 0.0);
    }

    #[test]
    fn root_of_mean_square() {
        // sqrt((1 + 9) / 2)
        let loss = RmsLoss::loss(&[0.0, 0.0], &[1.0, -3.0]);
        assert!((loss - 5.0_f64.sqrt()).abs() < 1e-12);
    }
}
