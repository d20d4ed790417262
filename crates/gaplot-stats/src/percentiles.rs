/// Precomputed percentile values for a dataset.
///
/// This structure stores percentile-value pairs for efficient lookup
/// of commonly used percentile points.
///
/// # Examples
///
/// ```
/// use gaplot_stats::percentiles::Percentiles;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(percentiles.get(50.0), Some(5.5));
/// assert_eq!(percentiles.get(25.0), Some(3.25));
/// ```
#[derive(Debug, Clone)]
pub struct Percentiles {
    /// Percentile-value pairs in the order they were requested.
    /// Each tuple contains (percentile, value) where percentile is 0.0-100.0.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from sorted values.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Values sorted in ascending order
    /// * `percentile_points` - The percentile points to compute (e.g., [25.0, 50.0, 75.0])
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaplot_stats::percentiles::Percentiles;
    ///
    /// let mut values = vec![5.0, 2.0, 8.0, 1.0, 9.0];
    /// values.sort_by(f64::total_cmp);
    /// let percentiles = Percentiles::from_sorted(&values, &[50.0, 90.0]);
    /// assert_eq!(percentiles.get(50.0), Some(5.0));
    /// ```
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let values = percentile_points
            .iter()
            .map(|&p| (p, compute_percentile(sorted_values, p)))
            .collect();
        Self { values }
    }

    /// Computes percentiles from unsorted values.
    ///
    /// This method will sort the values internally before computing percentiles.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaplot_stats::percentiles::Percentiles;
    ///
    /// let values = vec![5.0, 2.0, 8.0, 1.0, 9.0];
    /// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
    ///
    /// assert_eq!(percentiles.get(25.0), Some(2.0));
    /// assert_eq!(percentiles.get(50.0), Some(5.0));
    /// ```
    #[must_use]
    pub fn new(values: &[f64], percentile_points: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Gets the value at a specific percentile.
    ///
    /// Returns `None` if the percentile was not precomputed.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaplot_stats::percentiles::Percentiles;
    ///
    /// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    /// let percentiles = Percentiles::new(&values, &[50.0, 75.0]);
    ///
    /// assert_eq!(percentiles.get(50.0), Some(3.0));
    /// assert_eq!(percentiles.get(75.0), Some(4.0));
    /// assert_eq!(percentiles.get(25.0), None); // Not precomputed
    /// ```
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values.iter().find_map(|(p, value)| {
            if (*p - percentile).abs() < f64::EPSILON {
                Some(*value)
            } else {
                None
            }
        })
    }

    /// Returns an iterator over all (percentile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }
}

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest order statistics.
/// For `n` sorted values and a percentile `p`, the fractional rank is
/// `h = (n - 1) * p / 100` and the result lies between `sorted_values[floor(h)]`
/// and `sorted_values[floor(h) + 1]` at fraction `h - floor(h)`.
///
/// The interpolation is evaluated from the nearer end point (see [`lerp`]),
/// which keeps results bit-identical across runs and monotone in `p`.
/// Percentiles outside `0.0..=100.0` are clamped.
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use gaplot_stats::percentiles::compute_percentile;
///
/// let values = vec![10.0, 20.0, 30.0, 40.0];
///
/// assert_eq!(compute_percentile(&values, 0.0), 10.0);
/// assert_eq!(compute_percentile(&values, 50.0), 25.0);
/// assert_eq!(compute_percentile(&values, 75.0), 32.5);
/// assert_eq!(compute_percentile(&values, 100.0), 40.0);
/// assert!(compute_percentile(&[], 50.0).is_nan());
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(last) = sorted_values.len().checked_sub(1) else {
        return f64::NAN;
    };
    let fraction = (percentile / 100.0).clamp(0.0, 1.0);
    let rank = last as f64 * fraction;
    let lower_rank = rank.floor();
    let idx = (lower_rank as usize).min(last);
    let t = rank - lower_rank;
    match sorted_values.get(idx + 1) {
        Some(&upper) if t > 0.0 => lerp(sorted_values[idx], upper, t),
        _ => sorted_values[idx],
    }
}

/// Linear interpolation between `a` and `b` at fraction `t` in `[0, 1]`.
///
/// Evaluates from `a` when `t < 0.5` and from `b` otherwise, so the result
/// never leaves `[a, b]` through rounding.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        let values = [0.42];
        for p in [0.0, 25.0, 50.0, 75.0, 100.0] {
            assert_eq!(compute_percentile(&values, p), 0.42);
        }
    }

    #[test]
    fn test_two_values_quartiles() {
        let values = [10.0, 20.0];
        assert_eq!(compute_percentile(&values, 25.0), 12.5);
        assert_eq!(compute_percentile(&values, 50.0), 15.0);
        assert_eq!(compute_percentile(&values, 75.0), 17.5);
    }

    #[test]
    fn test_out_of_range_percentile_is_clamped() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(compute_percentile(&values, -10.0), 1.0);
        assert_eq!(compute_percentile(&values, 150.0), 3.0);
    }

    #[test]
    fn test_lerp_stays_within_endpoints() {
        let (a, b) = (0.1, 0.7);
        for step in 0..=100 {
            let t = f64::from(step) / 100.0;
            let v = lerp(a, b, t);
            assert!(a <= v && v <= b, "lerp({a}, {b}, {t}) = {v}");
        }
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
    }

    #[test]
    fn test_percentiles_keep_requested_order() {
        let percentiles = Percentiles::new(&[4.0, 1.0, 3.0, 2.0], &[75.0, 25.0]);
        let points = percentiles.iter().map(|(p, _)| p).collect::<Vec<_>>();
        assert_eq!(points, vec![75.0, 25.0]);
    }

    #[test]
    #[should_panic(expected = "values must be sorted in ascending order")]
    fn test_unsorted_input_panics() {
        let _ = Percentiles::from_sorted(&[3.0, 1.0, 2.0], &[50.0]);
    }
}
