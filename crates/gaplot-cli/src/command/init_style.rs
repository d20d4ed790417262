use std::path::PathBuf;

use clap::Args;

use crate::{plot_style::PlotStyle, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct InitStyleArg {
    /// Output file path [default: stdout]
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &InitStyleArg) -> anyhow::Result<()> {
    Output::save_json(&PlotStyle::default(), arg.output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util;

    #[test]
    fn test_written_style_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        run(&InitStyleArg {
            output: Some(path.clone()),
        })
        .unwrap();
        let style: PlotStyle = util::read_json_file("style", &path).unwrap();
        assert_eq!(style, PlotStyle::default());
    }
}
