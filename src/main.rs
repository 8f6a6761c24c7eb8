use anyhow::{Context, Result};
use clap::Parser;
use gentrack::cli::{Cli, Command};
use gentrack::{csv_output, dump, summary, CountMatrix};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read and parse a CSV artifact
fn load_artifact(path: &Path) -> Result<CountMatrix> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read artifact: {}", path.display()))?;
    let matrix = csv_output::parse_csv(&text)
        .with_context(|| format!("Failed to parse artifact: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        generations = matrix.generations(),
        units = matrix.names.len(),
        "artifact loaded"
    );
    Ok(matrix)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match args.command {
        Command::Render {
            input,
            format,
            output,
        } => {
            let matrix = load_artifact(&input)?;
            let mut rendered = dump::render(&matrix, format);
            match output {
                Some(path) => fs::write(&path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => {
                    if !rendered.ends_with('\n') {
                        rendered.push('\n');
                    }
                    print!("{}", rendered);
                }
            }
        }
        Command::Summary { input } => {
            let matrix = load_artifact(&input)?;
            print!("{}", summary::format_summary(&matrix));
        }
    }

    Ok(())
}
