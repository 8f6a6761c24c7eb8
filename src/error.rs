//! Errors for dumping and loading count artifacts

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring, writing or reading artifacts
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("Unsupported format: {0} (expected \"csv\" or \"table\")")]
    UnsupportedFormat(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid dump configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DumpError>;

impl DumpError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
