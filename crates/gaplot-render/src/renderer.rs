use gaplot_aggregate::StatisticsTable;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::{
    RenderError,
    artifact::ChartArtifact,
    chart::{ChartPlan, TitleContext, draw_error},
    config::RenderConfig,
    style::SeriesStyle,
};

/// Draws statistics tables as line charts.
///
/// All styling comes from the [`RenderConfig`], so renderers with different
/// configurations can be used side by side.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders one line per statistic of `stats`, in table column order.
    ///
    /// The configuration and `style` are checked before anything is drawn.
    pub fn render(
        &self,
        stats: &StatisticsTable,
        style: &SeriesStyle,
        context: &TitleContext,
    ) -> Result<ChartArtifact, RenderError> {
        self.config.validate()?;
        let plan = ChartPlan::new(stats, style, context, &self.config)?;

        let (width, height) = self.config.pixel_size();
        debug!(width, height, series = plan.series.len(), "rendering chart");
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            plan.draw(&root, &self.config)?;
            root.present().map_err(draw_error)?;
        }
        info!(label = %context.label, generations = stats.len(), "rendered chart");

        ChartArtifact::from_rgb(width, height, pixels).ok_or_else(|| RenderError::Draw {
            message: "raster size does not match the figure size".to_owned(),
        })
    }
}
