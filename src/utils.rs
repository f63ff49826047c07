// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Numeric helpers shared by the booster and the prediction step.

/// Logistic sigmoid in single precision, matching how XGBoost turns a
/// margin into a probability.
#[must_use]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Inverse of [`sigmoid`], clamped away from 0 and 1.
///
/// # Arguments
///
/// * `p` - Probability in `[0, 1]`.
///
/// # Returns
///
/// The log-odds `ln(p / (1 - p))`.
#[must_use]
pub fn logit(p: f64) -> f64 {
    let eps = 1e-16;
    let p = p.clamp(eps, 1.0 - eps);
    (p / (1.0 - p)).ln()
}

/// Numerically stable softmax.
#[must_use]
pub fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest value; the first one wins ties.
#[must_use]
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Parse a numeric list the way XGBoost writes scalars in JSON models.
///
/// Accepts a bare number (`"5E-1"`) or a bracketed list (`"[5E-1,2E-1]"`).
///
/// # Returns
///
/// `None` if any element fails to parse.
#[must_use]
pub fn parse_number_list(raw: &str) -> Option<Vec<f64>> {
    let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']');
    if trimmed.trim().is_empty() {
        return Some(Vec::new());
    }
    trimmed
        .split(',')
        .map(|s| s.trim().parse::<f64>().ok())
        .collect()
}

/// Pluralize a word based on count.
#[must_use]
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
