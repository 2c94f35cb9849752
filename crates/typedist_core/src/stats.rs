//! Descriptive statistics over paired vectors

use crate::error::{AnalysisError, Result};

/// Arithmetic mean; 0.0 for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient of two equal-length vectors.
///
/// Fails with `DegenerateInput` when either vector is constant or there are
/// fewer than two points. A vector of equal values counts as constant even
/// when rounding in the mean leaves a tiny non-zero variance.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(AnalysisError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(AnalysisError::DegenerateInput(format!(
            "correlation needs at least two points, got {}",
            xs.len()
        )));
    }

    if is_constant(xs) || is_constant(ys) {
        return Err(AnalysisError::DegenerateInput(
            "zero variance; correlation is undefined".to_string(),
        ));
    }

    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "zero variance; correlation is undefined".to_string(),
        ));
    }

    Ok((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
    }

    #[test]
    fn test_perfect_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson_correlation(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);

        let inverted = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson_correlation(&xs, &inverted).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_value() {
        // r computed by hand: cov = 2, var_x = 2, var_y = 8 -> 2 / 4 = 0.5
        let xs = [1.0, 2.0, 3.0];
        let ys = [1.0, 5.0, 3.0];
        assert!((pearson_correlation(&xs, &ys).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_is_degenerate() {
        let err = pearson_correlation(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateInput(_)));
    }

    #[test]
    fn test_equal_values_with_rounding_are_degenerate() {
        // The mean of seven copies of 100/7 is off by an ulp
        let xs = [100.0 / 7.0; 7];
        let ys = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let err = pearson_correlation(&xs, &ys).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateInput(_)));
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let err = pearson_correlation(&[1.0], &[1.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateInput(_)));
    }

    #[test]
    fn test_length_mismatch() {
        let err = pearson_correlation(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::LengthMismatch { left: 2, right: 1 }
        ));
    }
}
