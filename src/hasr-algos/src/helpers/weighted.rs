//! Weighted quantile, percentile rank and mean over value/weight pairs.

use super::numeric::interp;

/// Values sorted ascending with their cumulative weight fractions.
fn cumulative(values: &[f64], weights: &[f64]) -> Option<(Vec<f64>, Vec<f64>)> {
    if values.is_empty() || values.len() != weights.len() {
        return None;
    }

    let mut pairs: Vec<(f64, f64)> = values.iter().copied().zip(weights.iter().copied()).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut running = 0.0;
    let (sorted, mut cumulative): (Vec<f64>, Vec<f64>) = pairs
        .into_iter()
        .map(|(value, weight)| {
            running += weight;
            (value, running)
        })
        .unzip();

    if running <= 0.0 {
        return None;
    }
    cumulative.iter_mut().for_each(|c| *c /= running);

    Some((sorted, cumulative))
}

/// Value at cumulative weight fraction `quantile`. NaN on empty input.
pub fn weighted_quantile(values: &[f64], weights: &[f64], quantile: f64) -> f64 {
    match cumulative(values, weights) {
        Some((sorted, cumulative)) => interp(quantile, &cumulative, &sorted),
        None => f64::NAN,
    }
}

/// Cumulative weight fraction at `value`, clipped to `[0, 1]`. NaN on empty input.
pub fn weighted_percentile_rank(value: f64, values: &[f64], weights: &[f64]) -> f64 {
    match cumulative(values, weights) {
        Some((sorted, cumulative)) => interp(value, &sorted, &cumulative).clamp(0.0, 1.0),
        None => f64::NAN,
    }
}

/// Weighted mean, defined as 0 for an empty input.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sum_weights: f64 = weights.iter().sum();
    let sum_weighted: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    sum_weighted / sum_weights
}
