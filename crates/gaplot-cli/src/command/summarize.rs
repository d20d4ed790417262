use std::{io::Write as _, path::PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use gaplot_aggregate::{AggregateOptions, RunMetadata, StatisticsTable, aggregate};
use serde::Serialize;

use crate::{command::ExperimentArg, util, util::Output};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SummarizeArg {
    #[clap(flatten)]
    pub experiment: ExperimentArg,

    /// Export format
    #[arg(long, value_enum, default_value_t)]
    pub format: ExportFormat,

    /// Output file path [default: stdout]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Write to <DATA_DIR>/<NAME>/<NAME>_stats.<FORMAT>
    #[arg(long, conflicts_with = "output")]
    pub save: bool,
}

#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    experiment: &'a str,
    metadata: Option<&'a RunMetadata>,
    statistics: &'a StatisticsTable,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let layout = arg.experiment.layout()?;
    let raw = util::read_run_table(&layout, &arg.experiment.index_column)?;
    let params = util::read_run_parameters(&layout)?;
    let options = AggregateOptions {
        include_std: !arg.experiment.basic,
    };
    let (stats, metadata) = aggregate(&raw, params.as_ref(), &options)
        .with_context(|| format!("Failed to aggregate experiment {}", layout.name()))?;

    let output_path = if arg.save {
        Some(layout.stats_path(arg.format.extension()))
    } else {
        arg.output.clone()
    };

    match arg.format {
        ExportFormat::Csv => {
            let mut output = Output::from_output_path(output_path)?;
            stats
                .write_csv(&mut output)
                .with_context(|| format!("Failed to write CSV to {}", output.display_path()))?;
            output
                .flush()
                .with_context(|| format!("Failed to flush output to {}", output.display_path()))?;
        }
        ExportFormat::Json => {
            let report = SummaryReport {
                experiment: layout.name(),
                metadata: metadata.as_ref(),
                statistics: &stats,
            };
            Output::save_json(&report, output_path)?;
        }
    }

    Ok(())
}
