use statrs::statistics::Statistics;

/// Percent change from the previous element.
/// The first element has no predecessor, and a zero or non-finite
/// predecessor leaves the change undefined; both cases produce NAN for the
/// caller to drop.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        let prev = values[i - 1];
        let cur = values[i];
        if prev.is_finite() && cur.is_finite() && prev != 0.0 {
            out[i] = (cur - prev) / prev;
        }
    }
    out
}

/// Mean and population standard deviation of a column.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    let mean = values.iter().mean();
    let std = values.iter().population_std_dev();
    (mean, std)
}
