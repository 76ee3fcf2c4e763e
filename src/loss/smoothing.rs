/// Decaying running mean that weighs the newest sample as one of roughly
/// `factor + 1` recent samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentAverage {
    factor: f64,
    value: f64,
}

impl RecentAverage {
    /// Starts at `0.0`.
    pub fn new(factor: f64) -> RecentAverage {
        RecentAverage { factor, value: 0.0 }
    }

    /// Folds `sample` in and returns the updated average.
    pub fn push(&mut self, sample: f64) -> f64 {
        self.value = (self.value * self.factor + sample) / (self.factor + 1.0);
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}
