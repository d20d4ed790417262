use crate::{descriptive::DescriptiveStats, percentiles::Percentiles};

/// Percentile points kept by [`SummaryStats`]: lower quartile, median and upper quartile.
pub const QUARTILE_POINTS: [f64; 3] = [25.0, 50.0, 75.0];

/// Summary of one cross-section of observations.
///
/// Combines the descriptive statistics of a dataset with its quartiles,
/// which is everything a per-generation statistics row needs.
///
/// # Examples
///
/// ```
/// use gaplot_stats::summary::SummaryStats;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let summary = SummaryStats::new(values).unwrap();
///
/// assert_eq!(summary.stats.mean, 5.5);
/// assert_eq!(summary.lower_quartile(), 3.25);
/// assert_eq!(summary.upper_quartile(), 7.75);
/// ```
#[derive(Debug, Clone)]
pub struct SummaryStats {
    /// Basic descriptive statistics for the dataset.
    pub stats: DescriptiveStats,
    /// Precomputed quartile values.
    pub percentiles: Percentiles,
}

impl SummaryStats {
    /// Computes summary statistics from unsorted values.
    ///
    /// Returns `None` if the dataset is empty.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes summary statistics from pre-sorted values.
    ///
    /// Returns `None` if the dataset is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let percentiles = Percentiles::from_sorted(sorted_values, &QUARTILE_POINTS);
        Some(Self { stats, percentiles })
    }

    /// The 25th percentile.
    #[must_use]
    pub fn lower_quartile(&self) -> f64 {
        self.percentiles.get(25.0).unwrap_or(f64::NAN)
    }

    /// The 75th percentile.
    #[must_use]
    pub fn upper_quartile(&self) -> f64 {
        self.percentiles.get(75.0).unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_median_matches_quartile_table() {
        let summary = SummaryStats::new([9.0, 1.0, 5.0, 3.0]).unwrap();
        assert_eq!(summary.percentiles.get(50.0), Some(summary.stats.median));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_order_statistics_are_monotone(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 1..40),
        ) {
            let summary = SummaryStats::new(values).unwrap();
            let s = &summary.stats;
            prop_assert!(s.min <= summary.lower_quartile());
            prop_assert!(summary.lower_quartile() <= s.median);
            prop_assert!(s.median <= summary.upper_quartile());
            prop_assert!(summary.upper_quartile() <= s.max);
            prop_assert!(s.min <= s.mean && s.mean <= s.max);
            prop_assert!(s.std_dev >= 0.0);
        }

        #[test]
        fn prop_constant_values_have_zero_std_dev(
            value in -1.0e3f64..1.0e3,
            count in 1usize..30,
        ) {
            let summary = SummaryStats::new(vec![value; count]).unwrap();
            prop_assert_eq!(summary.stats.std_dev, 0.0);
            prop_assert_eq!(summary.stats.mean, value);
        }
    }
}
