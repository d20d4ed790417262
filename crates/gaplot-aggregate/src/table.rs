//! Raw per-run tables
//!
//! A raw run table has one row per generation (tournament) and one column per
//! population member or run. The trainer writes the index header as
//! `tournament:` and index cells as `3:`, so a single trailing `:` is ignored
//! on the index column.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use tracing::debug;

/// Default name of the generation index column.
pub const DEFAULT_INDEX_COLUMN: &str = "tournament";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ReadTableError {
    #[display("failed to open run table {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("malformed delimited content in run table")]
    Csv { source: csv::Error },
    #[display("missing generation index column '{column}'")]
    MissingIndexColumn { column: String },
    #[display("invalid generation index '{value}' on line {line}")]
    InvalidIndex { line: u64, value: String },
    #[display("generation index {value} on line {line} does not follow {previous}")]
    NonAscendingIndex { line: u64, value: i64, previous: i64 },
    #[display("line {line} has {actual} cells, the header has {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        actual: usize,
    },
    #[display("column '{column}' has {actual} cells, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// Cell values read as a missing observation rather than as text.
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One observation column of a [`RawRunTable`], kept as raw cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    name: String,
    cells: Vec<String>,
}

impl RawColumn {
    pub fn new<S, I>(name: S, cells: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            name: name.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Parses the column as numeric observations.
    ///
    /// A column is numeric when every cell parses as a float or is missing.
    /// Empty cells and NA markers (`NaN`, `NA`, `N/A`, `null`, ...) become
    /// missing observations (`None`).
    /// Returns `None` for non-numeric columns.
    #[must_use]
    pub fn parse_numeric(&self) -> Option<Vec<Option<f64>>> {
        self.cells
            .iter()
            .map(|cell| {
                let cell = cell.trim();
                if cell.is_empty() || MISSING_TOKENS.contains(&cell) {
                    return Some(None);
                }
                let value = cell.parse::<f64>().ok()?;
                Some((!value.is_nan()).then_some(value))
            })
            .collect()
    }
}

/// Per-run observations indexed by an ascending generation index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRunTable {
    index_column: String,
    generations: Vec<i64>,
    columns: Vec<RawColumn>,
}

impl RawRunTable {
    /// Builds a table from already-split columns.
    ///
    /// Every column must have one cell per generation and the generation
    /// index must be strictly ascending.
    pub fn from_columns<S>(
        index_column: S,
        generations: Vec<i64>,
        columns: Vec<RawColumn>,
    ) -> Result<Self, ReadTableError>
    where
        S: Into<String>,
    {
        // Line numbers as if written to a file: header on line 1.
        for (row, pair) in (2u64..).zip(generations.windows(2)) {
            if pair[1] <= pair[0] {
                return Err(ReadTableError::NonAscendingIndex {
                    line: row + 1,
                    value: pair[1],
                    previous: pair[0],
                });
            }
        }
        if let Some(column) = columns.iter().find(|c| c.cells.len() != generations.len()) {
            return Err(ReadTableError::ColumnLength {
                column: column.name.clone(),
                expected: generations.len(),
                actual: column.cells.len(),
            });
        }
        Ok(Self {
            index_column: index_column.into(),
            generations,
            columns,
        })
    }

    /// Reads a table from a delimited text file.
    pub fn from_path<P>(path: P, index_column: &str) -> Result<Self, ReadTableError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReadTableError::Open {
            path: path.to_owned(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), index_column)
    }

    /// Reads a table from delimited text with a header row.
    ///
    /// Rows may be short: missing trailing cells are treated as empty. A row
    /// with more cells than the header is an error.
    pub fn from_reader<R>(reader: R, index_column: &str) -> Result<Self, ReadTableError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|source| ReadTableError::Csv { source })?
            .clone();

        let wanted = strip_index_suffix(index_column);
        let index_pos = headers
            .iter()
            .position(|name| strip_index_suffix(name) == wanted)
            .ok_or_else(|| ReadTableError::MissingIndexColumn {
                column: index_column.to_owned(),
            })?;

        let mut generations = Vec::new();
        let mut columns = headers
            .iter()
            .enumerate()
            .filter(|(pos, _)| *pos != index_pos)
            .map(|(pos, name)| (pos, RawColumn::new(name, Vec::<String>::new())))
            .collect::<Vec<_>>();

        for record in reader.records() {
            let record = record.map_err(|source| ReadTableError::Csv { source })?;
            let line = record.position().map_or(0, csv::Position::line);
            if record.len() > headers.len() {
                return Err(ReadTableError::RaggedRow {
                    line,
                    expected: headers.len(),
                    actual: record.len(),
                });
            }
            let raw_index = record.get(index_pos).unwrap_or_default();
            let generation = strip_index_suffix(raw_index)
                .parse::<i64>()
                .map_err(|_| ReadTableError::InvalidIndex {
                    line,
                    value: raw_index.to_owned(),
                })?;
            match generations.last() {
                Some(&previous) if generation <= previous => {
                    return Err(ReadTableError::NonAscendingIndex {
                        line,
                        value: generation,
                        previous,
                    });
                }
                _ => {}
            }
            generations.push(generation);
            for (pos, column) in &mut columns {
                column
                    .cells
                    .push(record.get(*pos).unwrap_or_default().to_owned());
            }
        }

        debug!(
            rows = generations.len(),
            columns = columns.len(),
            "read raw run table"
        );

        Ok(Self {
            index_column: strip_index_suffix(&headers[index_pos]).to_owned(),
            generations,
            columns: columns.into_iter().map(|(_, column)| column).collect(),
        })
    }

    /// Name of the generation index column, without the trailing `:`.
    #[must_use]
    pub fn index_column(&self) -> &str {
        &self.index_column
    }

    #[must_use]
    pub fn generations(&self) -> &[i64] {
        &self.generations
    }

    /// Observation columns, excluding the index.
    #[must_use]
    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }
}

fn strip_index_suffix(s: &str) -> &str {
    let s = s.trim();
    s.strip_suffix(':').unwrap_or(s).trim_end()
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    const TRAINER_EXPORT: &str = "\
tournament:,population 1 winrate,population 1 select,population 1 actions
1:,0.25,Random,\"Move, Kill\"
2:,0.5,Safe,\"Move\"
";

    #[test]
    fn test_reads_trainer_export() {
        let table = RawRunTable::from_reader(TRAINER_EXPORT.as_bytes(), "tournament").unwrap();
        assert_eq!(table.index_column(), "tournament");
        assert_eq!(table.generations(), &[1, 2]);
        let names = table.columns().iter().map(RawColumn::name).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "population 1 winrate",
                "population 1 select",
                "population 1 actions"
            ]
        );
        assert_eq!(table.columns()[2].cells(), &["Move, Kill", "Move"]);
    }

    #[test]
    fn test_index_column_may_be_anywhere() {
        let csv = "a,generation,b\n0.1,10,0.2\n0.3,20,0.4\n";
        let table = RawRunTable::from_reader(csv.as_bytes(), "generation").unwrap();
        assert_eq!(table.generations(), &[10, 20]);
        assert_eq!(table.columns()[0].cells(), &["0.1", "0.3"]);
        assert_eq!(table.columns()[1].cells(), &["0.2", "0.4"]);
    }

    #[test]
    fn test_missing_index_column() {
        let csv = "a,b\n1,2\n";
        let err = RawRunTable::from_reader(csv.as_bytes(), "tournament").unwrap_err();
        assert!(matches!(err, ReadTableError::MissingIndexColumn { .. }));
    }

    #[test]
    fn test_invalid_index_value() {
        let csv = "tournament,a\n1,0.5\nsecond,0.4\n";
        let err = RawRunTable::from_reader(csv.as_bytes(), "tournament").unwrap_err();
        match err {
            ReadTableError::InvalidIndex { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "second");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_index_is_rejected() {
        let csv = "tournament,a\n1,0.5\n1,0.4\n";
        let err = RawRunTable::from_reader(csv.as_bytes(), "tournament").unwrap_err();
        assert!(matches!(
            err,
            ReadTableError::NonAscendingIndex {
                value: 1,
                previous: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let csv = "tournament,a,b\n1,0.5\n2,0.4,0.1\n";
        let table = RawRunTable::from_reader(csv.as_bytes(), "tournament").unwrap();
        assert_eq!(table.columns()[1].cells(), &["", "0.1"]);
    }

    #[test]
    fn test_long_row_is_rejected() {
        let csv = "tournament,a,b\n1,0.5,0.6\n2,0.4,0.1,0.9\n";
        let err = RawRunTable::from_reader(csv.as_bytes(), "tournament").unwrap_err();
        match err {
            ReadTableError::RaggedRow {
                line,
                expected,
                actual,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(actual, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RawRunTable::from_path(dir.path().join("absent.csv"), "tournament").unwrap_err();
        assert!(matches!(err, ReadTableError::Open { .. }));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_winrates.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(TRAINER_EXPORT.as_bytes()).unwrap();
        drop(file);

        let table = RawRunTable::from_path(&path, "tournament:").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_numeric_column_classification() {
        let numeric = RawColumn::new("w", ["0.5", "", "NaN", "1e-1"]);
        assert_eq!(
            numeric.parse_numeric(),
            Some(vec![Some(0.5), None, None, Some(0.1)])
        );

        let markers = RawColumn::new("m", ["NA", "0.25", "N/A", "n/a", "null", "<NA>"]);
        assert_eq!(
            markers.parse_numeric(),
            Some(vec![None, Some(0.25), None, None, None, None])
        );

        let text = RawColumn::new("s", ["0.5", "Random"]);
        assert_eq!(text.parse_numeric(), None);
    }

    #[test]
    fn test_from_columns_checks_lengths() {
        let err = RawRunTable::from_columns(
            "tournament",
            vec![1, 2],
            vec![RawColumn::new("a", ["0.1"])],
        )
        .unwrap_err();
        assert!(matches!(err, ReadTableError::ColumnLength { .. }));
    }
}
