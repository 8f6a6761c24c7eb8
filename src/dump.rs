//! Artifact formats, dump configuration and file output

use crate::csv_output::render_csv;
use crate::error::{DumpError, Result};
use crate::matrix::CountMatrix;
use crate::table_output::render_table;
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Text serialization of a count artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Comma-separated values, one line per generation
    #[default]
    Csv,
    /// Fixed-width columns for reading in a terminal
    Table,
}

impl Format {
    /// File extension used for artifacts in this format
    pub fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Table => "dump",
        }
    }
}

impl FromStr for Format {
    type Err = DumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(Format::Csv),
            "table" => Ok(Format::Table),
            other => Err(DumpError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Csv => write!(f, "csv"),
            Format::Table => write!(f, "table"),
        }
    }
}

/// Settings for [`crate::Tracker::dump`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    pub format: Format,
    /// Artifact name for plain callables
    pub callable_artifact: String,
    /// Artifact name for constructor-style units
    pub constructor_artifact: String,
    /// Label of the leading generation column
    pub generation_column: String,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            format: Format::Csv,
            callable_artifact: "calls".to_string(),
            constructor_artifact: "nodes".to_string(),
            generation_column: "Gen".to_string(),
        }
    }
}

/// TOML shape of [`DumpOptions`]; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawDumpOptions {
    format: Option<String>,
    callable_artifact: Option<String>,
    constructor_artifact: Option<String>,
    generation_column: Option<String>,
}

impl DumpOptions {
    /// Default options with a different format
    pub fn with_format(format: Format) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Load options from TOML text
    ///
    /// # Example TOML
    /// ```toml
    /// format = "table"
    /// callable_artifact = "calls"
    /// constructor_artifact = "nodes"
    /// generation_column = "Gen"
    /// ```
    ///
    /// Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawDumpOptions =
            toml::from_str(content).map_err(|e| DumpError::Config(e.to_string()))?;
        let defaults = Self::default();

        Ok(Self {
            format: match raw.format {
                Some(format) => format.parse()?,
                None => defaults.format,
            },
            callable_artifact: raw.callable_artifact.unwrap_or(defaults.callable_artifact),
            constructor_artifact: raw
                .constructor_artifact
                .unwrap_or(defaults.constructor_artifact),
            generation_column: raw.generation_column.unwrap_or(defaults.generation_column),
        })
    }

    /// Load options from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DumpError::io(path, e))?;
        Self::from_toml_str(&content)
    }
}

/// Paths written by a successful dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpReport {
    pub callable_path: PathBuf,
    pub constructor_path: PathBuf,
    /// Number of generations each artifact holds
    pub generations: usize,
}

/// Render a count matrix in the given format
pub fn render(matrix: &CountMatrix, format: Format) -> String {
    match format {
        Format::Csv => render_csv(matrix),
        Format::Table => render_table(matrix),
    }
}

/// `<dir>/<tracker_id>-<artifact>.<ext>`
pub fn artifact_path(dir: &Path, tracker_id: u64, artifact: &str, format: Format) -> PathBuf {
    dir.join(format!("{}-{}.{}", tracker_id, artifact, format.extension()))
}

/// Create or truncate `path` and write `content` to it
///
/// The file handle is closed before returning, on success or failure.
pub(crate) fn write_artifact(path: &Path, content: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| DumpError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| DumpError::io(path, e))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "artifact written");
    Ok(())
}
