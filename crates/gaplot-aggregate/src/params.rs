//! Run parameters and the metadata extracted from them

use std::{
    fmt,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::Serialize;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ReadParamsError {
    #[display("failed to open run parameters {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("malformed delimited content in run parameters")]
    Csv { source: csv::Error },
    #[display("run parameters have no data row")]
    MissingDataRow,
    #[display("run parameters must have exactly one data row, found {count}")]
    ExtraDataRows { count: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MetadataError {
    #[display("missing run parameter '{field}'")]
    MissingField { field: ParameterField },
    #[display("invalid value '{value}' for run parameter '{field}'")]
    InvalidField { field: ParameterField, value: String },
}

/// The single-row experiment configuration record, kept as label/value text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    fields: Vec<(String, String)>,
}

impl RunParameters {
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn from_path<P>(path: P) -> Result<Self, ReadParamsError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReadParamsError::Open {
            path: path.to_owned(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads parameters from delimited text with a header row and exactly one data row.
    pub fn from_reader<R>(reader: R) -> Result<Self, ReadParamsError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|source| ReadParamsError::Csv { source })?
            .clone();
        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ReadParamsError::Csv { source })?;
        let record = match records.as_slice() {
            [] => return Err(ReadParamsError::MissingDataRow),
            [record] => record,
            _ => {
                return Err(ReadParamsError::ExtraDataRows {
                    count: records.len(),
                });
            }
        };
        Ok(Self::from_fields(headers.iter().zip(record.iter())))
    }

    /// Looks up a value by its column label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Configuration fields read from [`RunParameters`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParameterField {
    TotalGenerations,
    TotalPopulations,
    TotalGames,
    MutationRate,
    CrossoverRate,
    NumberOfElites,
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.label(), f)
    }
}

impl ParameterField {
    pub const ALL: [Self; 6] = [
        Self::TotalGenerations,
        Self::TotalPopulations,
        Self::TotalGames,
        Self::MutationRate,
        Self::CrossoverRate,
        Self::NumberOfElites,
    ];

    /// Column label in the parameters file.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TotalGenerations => "Total Generations",
            Self::TotalPopulations => "Total Populations",
            Self::TotalGames => "Total Games",
            Self::MutationRate => "Mutation Rate",
            Self::CrossoverRate => "Crossover Rate",
            Self::NumberOfElites => "Number of Elites",
        }
    }

    /// Key shown in the chart annotation panel.
    #[must_use]
    pub fn display_key(self) -> &'static str {
        match self {
            Self::TotalGenerations => "Total Generations",
            Self::TotalPopulations => "Total Populations",
            Self::TotalGames => "Total Games",
            Self::MutationRate => "Mutation rate",
            Self::CrossoverRate => "Crossover rate",
            Self::NumberOfElites => "Number of elites",
        }
    }
}

/// Typed experiment configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetadata {
    pub total_generations: u64,
    pub total_populations: u64,
    pub total_games: u64,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub number_of_elites: u64,
}

impl RunMetadata {
    /// Extracts every [`ParameterField`] by label.
    ///
    /// A missing or unparsable field is an error; there are no defaults.
    pub fn from_parameters(params: &RunParameters) -> Result<Self, MetadataError> {
        Ok(Self {
            total_generations: count_field(params, ParameterField::TotalGenerations)?,
            total_populations: count_field(params, ParameterField::TotalPopulations)?,
            total_games: count_field(params, ParameterField::TotalGames)?,
            mutation_rate: rate_field(params, ParameterField::MutationRate)?,
            crossover_rate: rate_field(params, ParameterField::CrossoverRate)?,
            number_of_elites: count_field(params, ParameterField::NumberOfElites)?,
        })
    }

    #[must_use]
    pub fn value_text(&self, field: ParameterField) -> String {
        match field {
            ParameterField::TotalGenerations => self.total_generations.to_string(),
            ParameterField::TotalPopulations => self.total_populations.to_string(),
            ParameterField::TotalGames => self.total_games.to_string(),
            ParameterField::MutationRate => self.mutation_rate.to_string(),
            ParameterField::CrossoverRate => self.crossover_rate.to_string(),
            ParameterField::NumberOfElites => self.number_of_elites.to_string(),
        }
    }

    /// `key = value` lines in [`ParameterField::ALL`] order.
    #[must_use]
    pub fn annotation_lines(&self) -> Vec<String> {
        ParameterField::ALL
            .iter()
            .map(|&field| format!("{} = {}", field.display_key(), self.value_text(field)))
            .collect()
    }
}

fn raw_field(params: &RunParameters, field: ParameterField) -> Result<&str, MetadataError> {
    params
        .get(field.label())
        .ok_or(MetadataError::MissingField { field })
}

fn invalid(field: ParameterField, value: &str) -> MetadataError {
    MetadataError::InvalidField {
        field,
        value: value.to_owned(),
    }
}

/// Counts are accepted as integers or as integral floats (`200.0`).
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn count_field(params: &RunParameters, field: ParameterField) -> Result<u64, MetadataError> {
    let value = raw_field(params, field)?;
    if let Ok(count) = value.parse::<u64>() {
        return Ok(count);
    }
    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Ok(f as u64)
        }
        _ => Err(invalid(field, value)),
    }
}

fn rate_field(params: &RunParameters, field: ParameterField) -> Result<f64, MetadataError> {
    let value = raw_field(params, field)?;
    match value.parse::<f64>() {
        Ok(rate) if rate.is_finite() => Ok(rate),
        _ => Err(invalid(field, value)),
    }
}
