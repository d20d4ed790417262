//! Line-chart rendering of per-generation statistics.
//!
//! A [`Renderer`] turns a [`StatisticsTable`](gaplot_aggregate::StatisticsTable)
//! into a [`ChartArtifact`]: one colored line per statistic, generations on the
//! x axis, a title naming the experiment and, when run metadata is known, an
//! annotation box listing the run configuration.
//!
//! ```
//! use gaplot_render::{RenderConfig, SeriesStyle};
//!
//! let config: RenderConfig = serde_json::from_str(r#"{"dpi": 100}"#).unwrap();
//! assert_eq!(config.pixel_size(), (1600, 900));
//!
//! let style = SeriesStyle::default();
//! assert_eq!(style.color("Max").unwrap().to_string(), "blue");
//! ```

use gaplot_aggregate::Statistic;

pub use self::{
    artifact::{ArtifactError, ChartArtifact, open_in_viewer},
    chart::TitleContext,
    color::{ParseColorError, SeriesColor},
    config::{
        AnnotationBoxStyle, BoundingBox, ChartLabels, FigureSize, FontSizes, GridStyle,
        LegendPosition, RenderConfig, Theme,
    },
    renderer::Renderer,
    style::SeriesStyle,
};

pub mod artifact;
mod chart;
pub mod color;
pub mod config;
mod renderer;
pub mod style;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RenderError {
    #[display("no series color configured for statistic '{statistic}'")]
    MissingSeriesColor { statistic: Statistic },
    #[display("invalid render configuration: {reason}")]
    InvalidConfig { reason: String },
    #[display("failed to draw chart: {message}")]
    Draw { message: String },
}
