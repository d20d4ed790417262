use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use gaplot_aggregate::{RawRunTable, RunParameters};
use tracing::{info, warn};

use crate::layout::ExperimentLayout;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    /// Creates `path`, along with any missing parent directories.
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        info!(output = %self.display_path(), "wrote JSON");
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read the raw run table of an experiment
pub fn read_run_table(layout: &ExperimentLayout, index_column: &str) -> anyhow::Result<RawRunTable> {
    let path = layout.winrates_path();
    let table = RawRunTable::from_path(&path, index_column)
        .with_context(|| format!("Failed to read run table: {}", path.display()))?;
    info!(
        path = %path.display(),
        generations = table.len(),
        columns = table.columns().len(),
        "loaded run table"
    );
    Ok(table)
}

/// Read the run parameters of an experiment
///
/// A missing parameters file is not an error; the chart is then drawn
/// without run metadata.
pub fn read_run_parameters(layout: &ExperimentLayout) -> anyhow::Result<Option<RunParameters>> {
    let path = layout.params_path();
    if !path.is_file() {
        warn!(path = %path.display(), "run parameters not found, metadata will be omitted");
        return Ok(None);
    }
    let params = RunParameters::from_path(&path)
        .with_context(|| format!("Failed to read run parameters: {}", path.display()))?;
    Ok(Some(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameters_file() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ExperimentLayout::new(dir.path(), "Run42").unwrap();
        assert!(read_run_parameters(&layout).unwrap().is_none());
        assert!(read_run_table(&layout, "tournament").is_err());
    }

    #[test]
    fn test_read_experiment_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ExperimentLayout::new(dir.path(), "Run42").unwrap();
        fs::create_dir_all(layout.experiment_dir()).unwrap();
        fs::write(
            layout.winrates_path(),
            "tournament:,population 1 winrate,population 1 select\n1:,0.5,Random\n2:,0.6,Safe\n",
        )
        .unwrap();
        fs::write(
            layout.params_path(),
            "Total Generations,Total Populations,Total Games,Mutation Rate,Crossover Rate,Number of Elites\n2,1,10,0.1,0.9,0\n",
        )
        .unwrap();

        let table = read_run_table(&layout, "tournament").unwrap();
        assert_eq!(table.generations(), &[1, 2]);
        let params = read_run_parameters(&layout).unwrap().unwrap();
        assert_eq!(params.get("Total Games"), Some("10"));
    }

    #[test]
    fn test_output_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        Output::save_json(&[1, 2, 3], Some(path.clone())).unwrap();
        let value: Vec<i32> = read_json_file("test", &path).unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_read_json_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_json_file::<serde_json::Value, _>("style", &path).unwrap_err();
        assert!(err.to_string().contains("style JSON file"));
    }
}
