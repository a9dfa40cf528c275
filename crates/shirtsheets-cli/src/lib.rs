//! shirtsheets CLI - Command-line interface library
//!
//! Aggregates one year's shirt-trade sheets into a single CSV.
//!
//! # Library Usage
//!
//! ```ignore
//! use shirtsheets_cli::{aggregate_command, Settings};
//!
//! let summary = aggregate_command("2024", &Settings::default())?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Read in/shirt-sheets-2024.json and workbooks from sheets/, write out/shirts-2024.csv
//! shirtsheets 2024
//!
//! # CSV exports instead of workbooks, with a settings file
//! shirtsheets 2024 --source csv --sheets-dir exports --config shirtsheets.toml
//! ```

pub mod app;
pub mod settings;

// Re-export main entry point and types
pub use app::{aggregate_command, find_year, run_cli};
pub use settings::{PathSettings, Settings, SourceKind, SourceSettings};
