use tracing::{debug, info, warn};

use crate::{
    params::{MetadataError, RunMetadata, RunParameters},
    statistics::{Statistic, StatisticsRow, StatisticsTable},
    table::RawRunTable,
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AggregateError {
    #[display("invalid run parameters")]
    Metadata(MetadataError),
}

/// Options for [`aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Whether the table carries the standard deviation column.
    pub include_std: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self { include_std: true }
    }
}

impl AggregateOptions {
    #[must_use]
    pub fn statistics(&self) -> &'static [Statistic] {
        if self.include_std {
            &Statistic::EXTENDED
        } else {
            &Statistic::BASIC
        }
    }
}

/// Computes the per-generation statistics table of `raw`.
///
/// Only numeric columns contribute observations; other columns are skipped.
/// A row without any observation gets NaN in every column.
///
/// Metadata is extracted from `params` first, so a bad parameters record
/// fails before any statistics are computed.
pub fn aggregate(
    raw: &RawRunTable,
    params: Option<&RunParameters>,
    options: &AggregateOptions,
) -> Result<(StatisticsTable, Option<RunMetadata>), AggregateError> {
    let metadata = params.map(RunMetadata::from_parameters).transpose()?;

    let observations = raw
        .columns()
        .iter()
        .filter_map(|column| {
            let values = column.parse_numeric();
            if values.is_none() {
                debug!(column = column.name(), "excluding non-numeric column");
            }
            values
        })
        .collect::<Vec<_>>();
    if observations.is_empty() && !raw.is_empty() {
        warn!("run table has no numeric observation columns");
    }

    let statistics = options.statistics();
    let rows = raw
        .generations()
        .iter()
        .enumerate()
        .map(|(row, &generation)| {
            let values = observations.iter().filter_map(|column| column[row]);
            StatisticsRow::from_observations(generation, statistics, values)
        })
        .collect::<Vec<_>>();

    info!(
        generations = rows.len(),
        numeric_columns = observations.len(),
        excluded_columns = raw.columns().len() - observations.len(),
        "aggregated run table"
    );

    let table = StatisticsTable::new(raw.index_column().to_owned(), statistics.to_vec(), rows);
    Ok((table, metadata))
}
