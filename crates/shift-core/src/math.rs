//! Numeric helpers shared by the detector and attribution crates
//!
//! Plain f64 routines: means, sample standard deviation, ordinary
//! least-squares slope, rolling spread, linearly interpolated quantiles,
//! and fixed-precision rounding for reproducible reporting.

/// Arithmetic mean; 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1); 0.0 with fewer than two points
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Ordinary least-squares slope of `values` against a 0-based step index
///
/// Degenerates to 0.0 when the slice has fewer than two points.
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Mean of the sample standard deviations over all windows of size `window`
///
/// Returns `None` when the series is shorter than the window.
pub fn rolling_std_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let stds: Vec<f64> = values.windows(window).map(sample_std).collect();
    Some(mean(&stds))
}

/// Linearly interpolated quantile of a sorted slice (the numpy default)
///
/// `q` must lie in [0, 1]; the slice must be non-empty and ascending.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&q));
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Round to a fixed number of decimal places, half away from zero
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Sign of a float as -1.0, 0.0, or 1.0 (NaN maps to 0.0)
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mean(&[]), 0.0);

        // ddof = 1: variance of [2, 4, 4, 4, 5, 5, 7, 9] is 32/7
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_std(&data), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_eq!(sample_std(&[3.0]), 0.0);
    }

    #[test]
    fn test_ols_slope() {
        // Perfect line y = 2x + 1
        let line: Vec<f64> = (0..10).map(|i| 2.0 * i as f64 + 1.0).collect();
        assert_relative_eq!(ols_slope(&line), 2.0, epsilon = 1e-12);

        // Flat series
        assert_relative_eq!(ols_slope(&[5.0, 5.0, 5.0]), 0.0);

        // Too short
        assert_eq!(ols_slope(&[1.0]), 0.0);
        assert_eq!(ols_slope(&[]), 0.0);
    }

    #[test]
    fn test_rolling_std_mean() {
        let flat = vec![3.0; 20];
        assert_relative_eq!(rolling_std_mean(&flat, 8).unwrap(), 0.0);

        // Shorter than the window
        assert!(rolling_std_mean(&[1.0, 2.0], 8).is_none());

        // One exact window equals the plain sample std
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(rolling_std_mean(&data, 4).unwrap(), sample_std(&data));
    }

    #[test]
    fn test_quantile_sorted() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile_sorted(&data, 0.0), 1.0);
        assert_relative_eq!(quantile_sorted(&data, 1.0), 4.0);
        assert_relative_eq!(quantile_sorted(&data, 0.5), 2.5);
        assert_relative_eq!(quantile_sorted(&data, 0.25), 1.75);
        assert_relative_eq!(quantile_sorted(&[7.0], 0.3), 7.0);
    }

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(1.23456, 3), 1.235);
        assert_relative_eq!(round_to(-1.23456, 3), -1.235);
        assert_relative_eq!(round_to(10.0, 2), 10.0);
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.2), 1.0);
        assert_eq!(sign(-0.1), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(f64::NAN), 0.0);
    }
}
