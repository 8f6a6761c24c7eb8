//! CLI argument parsing for gentrack

use crate::dump::Format;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gentrack")]
#[command(version)]
#[command(about = "Inspect per-generation call count artifacts", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output on stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Re-render a CSV artifact as CSV or as a fixed-width table
    Render {
        /// CSV artifact to read
        #[arg(value_name = "CSV")]
        input: PathBuf,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "table")]
        format: Format,

        /// Write to this file instead of stdout
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print per-unit totals across all generations of a CSV artifact
    Summary {
        /// CSV artifact to read
        #[arg(value_name = "CSV")]
        input: PathBuf,
    },
}
