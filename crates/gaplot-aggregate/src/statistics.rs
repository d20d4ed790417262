use std::{fmt, io};

use gaplot_stats::summary::SummaryStats;
use serde::Serialize;

/// A named column of the statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Statistic {
    Max,
    #[serde(rename = "Upper Quantile")]
    UpperQuantile,
    Median,
    Mean,
    #[serde(rename = "Lower Quantile")]
    LowerQuantile,
    Min,
    #[serde(rename = "STD")]
    Std,
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.label(), f)
    }
}

impl Statistic {
    /// Column set with the standard deviation.
    pub const EXTENDED: [Self; 7] = [
        Self::Max,
        Self::UpperQuantile,
        Self::Median,
        Self::Mean,
        Self::LowerQuantile,
        Self::Min,
        Self::Std,
    ];

    /// Column set without the standard deviation.
    pub const BASIC: [Self; 6] = [
        Self::Max,
        Self::UpperQuantile,
        Self::Median,
        Self::Mean,
        Self::LowerQuantile,
        Self::Min,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Max => "Max",
            Self::UpperQuantile => "Upper Quantile",
            Self::Median => "Median",
            Self::Mean => "Mean",
            Self::LowerQuantile => "Lower Quantile",
            Self::Min => "Min",
            Self::Std => "STD",
        }
    }

    fn evaluate(self, summary: &SummaryStats) -> f64 {
        let stats = &summary.stats;
        match self {
            Self::Max => stats.max,
            Self::UpperQuantile => summary.upper_quartile(),
            Self::Median => stats.median,
            Self::Mean => stats.mean,
            Self::LowerQuantile => summary.lower_quartile(),
            Self::Min => stats.min,
            Self::Std => stats.std_dev,
        }
    }
}

/// One generation of the statistics table.
///
/// `values` is aligned with [`StatisticsTable::statistics`].
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsRow {
    pub generation: i64,
    pub values: Vec<f64>,
}

impl StatisticsRow {
    /// Evaluates `statistics` over one row's observations.
    ///
    /// Every value is NaN when there are no observations.
    pub(crate) fn from_observations<I>(generation: i64, statistics: &[Statistic], values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let summary = SummaryStats::new(values);
        let values = statistics
            .iter()
            .map(|s| summary.as_ref().map_or(f64::NAN, |summary| s.evaluate(summary)))
            .collect();
        Self { generation, values }
    }
}

/// Per-generation summary statistics derived from a raw run table.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsTable {
    index_column: String,
    statistics: Vec<Statistic>,
    rows: Vec<StatisticsRow>,
}

impl StatisticsTable {
    pub(crate) fn new(
        index_column: String,
        statistics: Vec<Statistic>,
        rows: Vec<StatisticsRow>,
    ) -> Self {
        debug_assert!(rows.iter().all(|r| r.values.len() == statistics.len()));
        Self {
            index_column,
            statistics,
            rows,
        }
    }

    #[must_use]
    pub fn index_column(&self) -> &str {
        &self.index_column
    }

    /// Column order of the table.
    #[must_use]
    pub fn statistics(&self) -> &[Statistic] {
        &self.statistics
    }

    #[must_use]
    pub fn rows(&self) -> &[StatisticsRow] {
        &self.rows
    }

    pub fn generations(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.iter().map(|r| r.generation)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(generation, value)` pairs of one column, or `None` if the table lacks it.
    pub fn series(&self, statistic: Statistic) -> Option<impl Iterator<Item = (i64, f64)> + '_> {
        let col = self.statistics.iter().position(|&s| s == statistic)?;
        Some(self.rows.iter().map(move |r| (r.generation, r.values[col])))
    }

    /// Collects one column into a vector.
    #[must_use]
    pub fn column(&self, statistic: Statistic) -> Option<Vec<f64>> {
        Some(self.series(statistic)?.map(|(_, v)| v).collect())
    }

    /// Writes the table as CSV, leaving NaN cells empty.
    pub fn write_csv<W>(&self, writer: W) -> Result<(), csv::Error>
    where
        W: io::Write,
    {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(
            std::iter::once(self.index_column.as_str())
                .chain(self.statistics.iter().map(|s| s.label())),
        )?;
        for row in &self.rows {
            writer.write_record(
                std::iter::once(row.generation.to_string()).chain(row.values.iter().map(|v| {
                    if v.is_nan() {
                        String::new()
                    } else {
                        v.to_string()
                    }
                })),
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StatisticsTable {
        let statistics = Statistic::BASIC.to_vec();
        let rows = vec![
            StatisticsRow::from_observations(1, &statistics, [10.0, 20.0]),
            StatisticsRow::from_observations(2, &statistics, std::iter::empty()),
        ];
        StatisticsTable::new("tournament".to_owned(), statistics, rows)
    }

    #[test]
    fn test_labels_are_distinct() {
        let labels = Statistic::EXTENDED.map(Statistic::label);
        for (i, label) in labels.iter().enumerate() {
            assert!(!labels[i + 1..].contains(label), "{label}");
        }
    }

    #[test]
    fn test_empty_row_is_nan() {
        let table = table();
        assert!(table.rows()[1].values.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_series_lookup() {
        let table = table();
        assert_eq!(table.column(Statistic::Max).unwrap()[0], 20.0);
        assert!(table.series(Statistic::Std).is_none());
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        table().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "tournament,Max,Upper Quantile,Median,Mean,Lower Quantile,Min\n\
             1,20,17.5,15,15,12.5,10\n\
             2,,,,,,\n"
        );
    }

    #[test]
    fn test_serialize_json_labels() {
        let json = serde_json::to_value(table()).unwrap();
        assert_eq!(json["statistics"][1], "Upper Quantile");
        assert_eq!(json["rows"][0]["values"][0], 20.0);
        assert!(json["rows"][1]["values"][0].is_null());
    }
}
