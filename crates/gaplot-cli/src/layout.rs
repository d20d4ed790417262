//! File naming convention of an experiment directory
//!
//! ```text
//! {data_dir}/{name}/{name}_winrates.csv
//! {data_dir}/{name}/{name}_params.csv
//! {data_dir}/{name}/{name}_stats.{csv,json}
//! {data_dir}/{name}/images/{name}_plot.png
//! ```

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExperimentLayout {
    data_dir: PathBuf,
    name: String,
}

impl ExperimentLayout {
    pub(crate) fn new<P, S>(data_dir: P, name: S) -> anyhow::Result<Self>
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        let name = name.into();
        anyhow::ensure!(
            !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\']),
            "Invalid experiment name: {name:?}"
        );
        Ok(Self {
            data_dir: data_dir.into(),
            name,
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn experiment_dir(&self) -> PathBuf {
        self.data_dir.join(&self.name)
    }

    fn file(&self, suffix: &str) -> PathBuf {
        self.experiment_dir().join(format!("{}{suffix}", self.name))
    }

    pub(crate) fn winrates_path(&self) -> PathBuf {
        self.file("_winrates.csv")
    }

    pub(crate) fn params_path(&self) -> PathBuf {
        self.file("_params.csv")
    }

    pub(crate) fn stats_path(&self, extension: &str) -> PathBuf {
        self.file(&format!("_stats.{extension}"))
    }

    pub(crate) fn plot_path(&self) -> PathBuf {
        self.experiment_dir()
            .join("images")
            .join(format!("{}_plot.png", self.name))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_paths() {
        let layout = ExperimentLayout::new("data", "Run42").unwrap();
        assert_eq!(layout.name(), "Run42");
        assert_eq!(
            layout.winrates_path(),
            Path::new("data/Run42/Run42_winrates.csv")
        );
        assert_eq!(
            layout.params_path(),
            Path::new("data/Run42/Run42_params.csv")
        );
        assert_eq!(
            layout.stats_path("json"),
            Path::new("data/Run42/Run42_stats.json")
        );
        assert_eq!(
            layout.plot_path(),
            Path::new("data/Run42/images/Run42_plot.png")
        );
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", ".", "..", "a/b", "a\\b"] {
            assert!(ExperimentLayout::new("data", name).is_err(), "{name}");
        }
    }
}
