use std::collections::BTreeMap;

use gaplot_aggregate::Statistic;
use serde::{Deserialize, Serialize};

use crate::{RenderError, color::SeriesColor};

const DEFAULT_PALETTE: [(Statistic, &str); 7] = [
    (Statistic::Max, "blue"),
    (Statistic::UpperQuantile, "cyan"),
    (Statistic::Median, "lime"),
    (Statistic::Mean, "yellow"),
    (Statistic::LowerQuantile, "darkorange"),
    (Statistic::Min, "red"),
    (Statistic::Std, "pink"),
];

/// Display color of each statistic series, keyed by statistic label.
///
/// The default palette uses bold colors that stay distinguishable on a dark
/// background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesStyle {
    colors: BTreeMap<String, SeriesColor>,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        let mut style = Self::empty();
        for (statistic, name) in DEFAULT_PALETTE {
            if let Some(color) = SeriesColor::named(name) {
                style.insert(statistic.label(), color);
            }
        }
        style
    }
}

impl SeriesStyle {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_color<S>(mut self, label: S, color: SeriesColor) -> Self
    where
        S: Into<String>,
    {
        self.insert(label, color);
        self
    }

    pub fn insert<S>(&mut self, label: S, color: SeriesColor) -> Option<SeriesColor>
    where
        S: Into<String>,
    {
        self.colors.insert(label.into(), color)
    }

    pub fn remove(&mut self, label: &str) -> Option<SeriesColor> {
        self.colors.remove(label)
    }

    /// Overrides entries of `self` with every entry of `other`.
    pub fn merge(&mut self, other: &Self) {
        self.colors
            .extend(other.colors.iter().map(|(k, v)| (k.clone(), *v)));
    }

    #[must_use]
    pub fn color(&self, label: &str) -> Option<SeriesColor> {
        self.colors.get(label).copied()
    }

    /// Colors for `statistics`, in the same order.
    ///
    /// Fails on the first statistic without an entry.
    pub fn resolve(
        &self,
        statistics: &[Statistic],
    ) -> Result<Vec<(Statistic, SeriesColor)>, RenderError> {
        statistics
            .iter()
            .map(|&statistic| {
                self.color(statistic.label())
                    .map(|color| (statistic, color))
                    .ok_or(RenderError::MissingSeriesColor { statistic })
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SeriesColor)> + '_ {
        self.colors.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
