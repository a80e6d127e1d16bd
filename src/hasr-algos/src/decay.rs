/// Normalized exponential-decay weights over a window of days.
///
/// Index 0 is the most recent day of the window, index `i` the day `i` days
/// before it: `weight[i] = lambda^i / sum(lambda^j)`.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightProfile {
    weights: Vec<f64>,
}

impl WeightProfile {
    pub fn exponential(window_days: usize, lambda: f64) -> Self {
        let raw: Vec<f64> = (0..window_days).map(|i| lambda.powi(i as i32)).collect();
        let total: f64 = raw.iter().sum();

        Self {
            weights: raw.into_iter().map(|w| w / total).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of the day `days_back` days before the end of the window.
    pub fn weight(&self, days_back: usize) -> Option<f64> {
        self.weights.get(days_back).copied()
    }
}
