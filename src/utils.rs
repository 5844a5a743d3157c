//! Utility functions shared by observers and exporters

/// Trailing mean over a sliding window.
///
/// Mirrors a "valid" convolution with a box filter: the result has
/// `values.len() - window + 1` entries, the first being the mean of the first
/// `window` values. Series shorter than the window (or a zero window) are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use gridq::utils::moving_average;
///
/// assert_eq!(moving_average(&[1.0, 2.0, 3.0, 4.0], 2), vec![1.5, 2.5, 3.5]);
/// assert_eq!(moving_average(&[1.0, 2.0], 5), vec![1.0, 2.0]);
/// ```
pub fn moving_average(values: &[f32], window: usize) -> Vec<f32> {
    if window == 0 || values.len() < window {
        return values.to_vec();
    }
    values
        .windows(window)
        .map(|w| w.iter().sum::<f32>() / window as f32)
        .collect()
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let values = [3.0, -1.0, 7.0];
        assert_eq!(moving_average(&values, 1), values.to_vec());
    }

    #[test]
    fn test_moving_average_full_window() {
        assert_eq!(moving_average(&[2.0, 4.0, 6.0], 3), vec![4.0]);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
    }
}
