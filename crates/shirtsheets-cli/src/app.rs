//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use shirtsheets_data::{
    catalog_file_name, output_file_name, AggregateEngine, CsvOptions, CsvSource, RunSummary,
    SheetSource, XlsxSource,
};

use crate::settings::{Settings, SourceKind};

#[derive(Parser, Debug)]
#[command(name = "shirtsheets")]
#[command(author, version, about = "Aggregate shirt-trade sheets into one CSV", long_about = None)]
struct Cli {
    /// Run arguments; the first 4-byte one is the year
    args: Vec<String>,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding shirt-sheets-<year>.json
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving shirts-<year>.csv
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Sheet source kind
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// Directory of sheet workbooks or exports
    #[arg(long)]
    sheets_dir: Option<PathBuf>,

    /// Field delimiter of CSV exports
    #[arg(long)]
    delimiter: Option<char>,

    /// Log every skipped row
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Settings file contents with flag overrides applied
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(dir) = &self.input_dir {
            settings.paths.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.paths.output_dir = dir.clone();
        }
        if let Some(kind) = self.source {
            settings.source.kind = kind;
        }
        if let Some(dir) = &self.sheets_dir {
            settings.source.dir = dir.clone();
        }
        if let Some(delimiter) = self.delimiter {
            settings.source.delimiter = delimiter;
        }

        Ok(settings)
    }
}

/// Log filter: `RUST_LOG` when set, otherwise INFO (DEBUG with `--verbose`)
fn log_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Initialize the tracing subscriber
fn init_logging(verbose: bool) {
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI application
///
/// Parses arguments, resolves settings and aggregates the requested year.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let year = find_year(&cli.args)?;
    let settings = cli.settings()?;

    aggregate_command(year, &settings)?;
    Ok(())
}

/// Pick the year out of the run arguments: the first argument 4 bytes long
pub fn find_year(args: &[String]) -> Result<&str> {
    args.iter()
        .map(String::as_str)
        .find(|arg| arg.len() == 4)
        .context("Required 4-digit year parameter not found")
}

/// Aggregate all sheets of `year` as configured by `settings`
pub fn aggregate_command(year: &str, settings: &Settings) -> Result<RunSummary> {
    let catalog = settings.paths.input_dir.join(catalog_file_name(year));
    let output = settings.paths.output_dir.join(output_file_name(year));

    info!(
        "Aggregating {} into {} ({:?} source at {})",
        catalog.display(),
        output.display(),
        settings.source.kind,
        settings.source.dir.display()
    );

    let dir = &settings.source.dir;
    let source: Box<dyn SheetSource> = match settings.source.kind {
        SourceKind::Xlsx => Box::new(XlsxSource::new(dir).with_context(|| {
            format!("Failed to open workbook directory: {}", dir.display())
        })?),
        SourceKind::Csv => {
            let delimiter = settings.source.delimiter;
            ensure!(
                delimiter.is_ascii(),
                "CSV delimiter must be an ASCII character, got {:?}",
                delimiter
            );
            let options = CsvOptions::with_delimiter(delimiter as u8);
            Box::new(CsvSource::with_options(dir, options).with_context(|| {
                format!("Failed to open export directory: {}", dir.display())
            })?)
        }
    };

    let summary = AggregateEngine::aggregate_files(&catalog, &output, source)
        .with_context(|| format!("Failed to aggregate shirt sheets for {}", year))?;

    Ok(summary)
}
