use statrs::distribution::{ContinuousCDF, Normal};

/// `part / whole` as a percentage; 0 when `whole` is 0.
pub fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Two-sided z value for a confidence level, e.g. 0.95 -> ~1.96.
pub fn z_for_confidence(level: f64) -> f64 {
    let level = level.clamp(0.5, 0.9999);
    match Normal::new(0.0, 1.0) {
        Ok(normal) => normal.inverse_cdf(0.5 + level / 2.0),
        Err(_) => 1.96,
    }
}

/// Wilson score interval for a binomial proportion, as fractions in [0, 1].
pub fn wilson_interval(successes: usize, total: usize, z: f64) -> (f64, f64) {
    if total == 0 {
        return (0.0, 0.0);
    }

    let n = total as f64;
    let p = successes as f64 / n;

    let denominator = 1.0 + (z * z / n);
    let center = (p + (z * z) / (2.0 * n)) / denominator;
    let margin = (z * ((p * (1.0 - p) / n) + (z * z) / (4.0 * n * n)).sqrt()) / denominator;

    ((center - margin).max(0.0), (center + margin).min(1.0))
}
