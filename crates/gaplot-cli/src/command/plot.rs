use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use gaplot_aggregate::{AggregateOptions, aggregate};
use gaplot_render::{Renderer, TitleContext};
use tracing::info;

use crate::{command::ExperimentArg, plot_style::PlotStyle, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct PlotArg {
    #[clap(flatten)]
    pub experiment: ExperimentArg,

    /// Style file overriding colors and chart appearance (see `init-style`)
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Chart output path [default: <DATA_DIR>/<NAME>/images/<NAME>_plot.png]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Do not write the chart to disk
    #[arg(long, conflicts_with = "output")]
    pub no_save: bool,

    /// Open the chart in the image viewer
    #[arg(long)]
    pub show: bool,
}

pub(crate) fn run(arg: &PlotArg) -> anyhow::Result<()> {
    let layout = arg.experiment.layout()?;
    let style = match &arg.style {
        Some(path) => util::read_json_file::<PlotStyle, _>("style", path)?,
        None => PlotStyle::default(),
    };
    let series_style = style.series_style();
    let renderer = Renderer::new(style.render);
    renderer
        .config()
        .validate()
        .context("Invalid style configuration")?;

    let raw = util::read_run_table(&layout, &arg.experiment.index_column)?;
    let params = util::read_run_parameters(&layout)?;
    let options = AggregateOptions {
        include_std: !arg.experiment.basic,
    };
    let (stats, metadata) = aggregate(&raw, params.as_ref(), &options)
        .with_context(|| format!("Failed to aggregate experiment {}", layout.name()))?;

    let context = TitleContext::new(layout.name()).with_metadata(metadata);
    let artifact = renderer
        .render(&stats, &series_style, &context)
        .context("Failed to render chart")?;

    if arg.no_save {
        info!("chart not saved (--no-save)");
    } else {
        let path = arg.output.clone().unwrap_or_else(|| layout.plot_path());
        artifact
            .save(&path)
            .with_context(|| format!("Failed to save chart: {}", path.display()))?;
    }

    if arg.show {
        let path = artifact.show().context("Failed to show chart")?;
        info!(path = %path.display(), "opened chart in image viewer");
    }

    Ok(())
}
