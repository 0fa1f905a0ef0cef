use serde::Serialize;

/// Median of `prices`, or 0.0 when there are none.
pub fn median(prices: &[u64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    let mut sorted = prices.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Arithmetic mean of `prices`, or 0.0 when there are none.
pub fn mean(prices: &[u64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    prices.iter().map(|p| *p as f64).sum::<f64>() / prices.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub prices: Vec<u64>,
    pub median: f64,
    pub mean: f64,
    /// mean - median, may be negative
    pub difference: f64,
}

impl PriceSummary {
    pub fn summarize(prices: &[u64]) -> PriceSummary {
        let mut sorted = prices.to_vec();
        sorted.sort_unstable();
        let median = median(&sorted);
        let mean = mean(&sorted);
        PriceSummary {
            prices: sorted,
            median,
            mean,
            difference: mean - median,
        }
    }
}
