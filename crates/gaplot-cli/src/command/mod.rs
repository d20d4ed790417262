use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use gaplot_aggregate::DEFAULT_INDEX_COLUMN;
use tracing_subscriber::FmtSubscriber;

use crate::layout::ExperimentLayout;

use self::{init_style::InitStyleArg, plot::PlotArg, summarize::SummarizeArg};

mod init_style;
mod plot;
mod summarize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

impl CommandArgs {
    fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Aggregate a run table and draw its statistics chart
    Plot(#[clap(flatten)] PlotArg),
    /// Aggregate a run table and export the statistics table
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Write the default style file
    InitStyle(#[clap(flatten)] InitStyleArg),
}

/// Locates the input files of one experiment.
#[derive(Debug, Clone, Args)]
pub(crate) struct ExperimentArg {
    /// Experiment name; inputs are read from `<DATA_DIR>/<NAME>/`
    pub name: String,

    /// Root directory holding one directory per experiment
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Name of the generation index column in the run table
    #[arg(long, default_value = DEFAULT_INDEX_COLUMN)]
    pub index_column: String,

    /// Leave out the standard deviation statistic
    #[arg(long)]
    pub basic: bool,
}

impl ExperimentArg {
    pub(crate) fn layout(&self) -> anyhow::Result<ExperimentLayout> {
        ExperimentLayout::new(self.data_dir.clone(), self.name.clone())
    }
}

fn init_logging(args: &CommandArgs) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(&args)?;
    match &args.mode {
        Mode::Plot(arg) => plot::run(arg)?,
        Mode::Summarize(arg) => summarize::run(arg)?,
        Mode::InitStyle(arg) => init_style::run(arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_defaults() {
        let args = CommandArgs::try_parse_from(["gaplot", "plot", "Run42"]).unwrap();
        assert_eq!(args.log_level(), tracing::Level::INFO);
        let Mode::Plot(arg) = args.mode else {
            panic!("expected plot mode");
        };
        assert_eq!(arg.experiment.name, "Run42");
        assert_eq!(arg.experiment.data_dir, PathBuf::from("data"));
        assert_eq!(arg.experiment.index_column, "tournament");
        assert!(!arg.experiment.basic);
        assert!(!arg.no_save && !arg.show);
    }

    #[test]
    fn test_global_flags() {
        let args =
            CommandArgs::try_parse_from(["gaplot", "summarize", "Run42", "--basic", "-v"]).unwrap();
        assert_eq!(args.log_level(), tracing::Level::DEBUG);
        let args = CommandArgs::try_parse_from(["gaplot", "-q", "init-style"]).unwrap();
        assert_eq!(args.log_level(), tracing::Level::ERROR);
        assert!(CommandArgs::try_parse_from(["gaplot", "-q", "-v", "init-style"]).is_err());
    }

    #[test]
    fn test_name_is_required() {
        assert!(CommandArgs::try_parse_from(["gaplot", "plot"]).is_err());
    }
}
