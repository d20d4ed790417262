//! Aggregation of genetic-algorithm run logs into per-generation statistics.
//!
//! The input is a [`RawRunTable`]: one row per generation (tournament), one
//! column per population member. [`aggregate`] reduces every row to the fixed
//! set of [`Statistic`] columns and, when a [`RunParameters`] record is given,
//! extracts the [`RunMetadata`] shown next to the chart.
//!
//! ```
//! use gaplot_aggregate::{AggregateOptions, RawRunTable, Statistic, aggregate};
//!
//! let csv = "tournament,p1,p2,p1 select\n1,10,20,Random\n2,15,15,Safe\n3,0,30,Random\n";
//! let raw = RawRunTable::from_reader(csv.as_bytes(), "tournament").unwrap();
//! let (stats, metadata) = aggregate(&raw, None, &AggregateOptions::default()).unwrap();
//!
//! assert!(metadata.is_none());
//! assert_eq!(stats.column(Statistic::Max).unwrap(), vec![20.0, 15.0, 30.0]);
//! assert_eq!(stats.column(Statistic::Mean).unwrap(), vec![15.0, 15.0, 15.0]);
//! ```

pub use self::{
    aggregator::{AggregateError, AggregateOptions, aggregate},
    params::{MetadataError, ParameterField, ReadParamsError, RunMetadata, RunParameters},
    statistics::{Statistic, StatisticsRow, StatisticsTable},
    table::{DEFAULT_INDEX_COLUMN, RawColumn, RawRunTable, ReadTableError},
};

pub mod aggregator;
pub mod params;
pub mod statistics;
pub mod table;
