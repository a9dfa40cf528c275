//! Run settings.
//!
//! Settings are read from an optional TOML file; command-line flags override
//! individual values.
//!
//! ```toml
//! [paths]
//! input_dir = "in"
//! output_dir = "out"
//!
//! [source]
//! kind = "xlsx"
//! dir = "sheets"
//! delimiter = ","
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Where sheet rows are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// One `.xlsx` workbook per sheet id
    #[default]
    Xlsx,
    /// One `.csv` export per sheet id
    Csv,
}

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub source: SourceSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }
}

/// Catalog and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory holding `shirt-sheets-<year>.json`
    pub input_dir: PathBuf,
    /// Directory receiving `shirts-<year>.csv`
    pub output_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("in"),
            output_dir: PathBuf::from("out"),
        }
    }
}

/// Sheet source selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    /// Directory of workbooks or exports
    pub dir: PathBuf,
    /// Field delimiter of CSV exports; must be ASCII
    pub delimiter: char,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Xlsx,
            dir: PathBuf::from("sheets"),
            delimiter: ',',
        }
    }
}
