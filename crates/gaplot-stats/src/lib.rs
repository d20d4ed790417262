//! Statistical utilities for summarizing genetic-algorithm experiment logs.
//!
//! This crate provides the numeric building blocks of the statistics table:
//!
//! - **Descriptive statistics**: min, max, mean, median, sample variance and standard deviation
//! - **Percentiles**: linearly interpolated percentiles with a reproducible evaluation order
//! - **Summary statistics**: descriptive statistics combined with quartiles
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`summary`]: Descriptive statistics plus quartiles for one cross-section
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use gaplot_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use gaplot_stats::percentiles::Percentiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
//! assert_eq!(percentiles.get(50.0), Some(3.0));
//! ```
//!
//! ## Summarizing one generation
//!
//! ```
//! use gaplot_stats::summary::SummaryStats;
//!
//! let winrates = [0.10, 0.20];
//! let summary = SummaryStats::new(winrates).unwrap();
//! assert_eq!(summary.stats.max, 0.20);
//! assert_eq!(summary.stats.min, 0.10);
//! ```

pub mod descriptive;
pub mod percentiles;
pub mod summary;
