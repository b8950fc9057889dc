use std::io::Write;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use nbvalidate::{DEFAULT_MAX_INPUT_BYTES, SourceConfig, ValidationConfig, output, validate_reader};

use crate::logging;

/// Format of the single result line written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `valid` or `invalid: <detail>`
    Text,
    /// One line of compact JSON
    Json,
}

/// Validate a Jupyter notebook (nbformat v4) read from standard input.
///
/// Prints `valid` and exits 0, or prints `invalid: <detail>` and exits 1.
#[derive(Debug, Parser)]
#[command(name = "nbvalidate", version)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Reject input larger than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_input_bytes: u64,

    /// Accept notebooks in which several cells share an id
    #[arg(long)]
    pub allow_duplicate_cell_ids: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn source_config(&self) -> SourceConfig {
        let mut config = SourceConfig::default();
        config.max_input_bytes = self.max_input_bytes;
        config
    }

    fn validation_config(&self) -> ValidationConfig {
        let mut config = ValidationConfig::default();
        config.enforce_unique_cell_ids = !self.allow_duplicate_cell_ids;
        config
    }
}

/// Parse arguments, validate stdin, print the result line.
///
/// Returns the process exit code: 0 for a valid notebook, 1 otherwise.
///
/// # Errors
///
/// Returns an error only if the result line cannot be written to stdout.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let report = validate_reader(
        std::io::stdin().lock(),
        &cli.source_config(),
        &cli.validation_config(),
    );

    let mut stdout = std::io::stdout().lock();
    match cli.format {
        OutputFormat::Text => output::write_text(&report, &mut stdout)?,
        OutputFormat::Json => output::write_json(&report, &mut stdout)?,
    }
    stdout.flush()?;

    Ok(report.exit_code())
}
