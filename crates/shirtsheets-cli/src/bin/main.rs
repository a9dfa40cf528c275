//! shirtsheets CLI binary entry point
//!
//! This is a thin wrapper that calls the library's `run_cli()` function and
//! reports a failed run.

use std::process::ExitCode;

use shirtsheets_cli::run_cli;
use tracing::error;

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
