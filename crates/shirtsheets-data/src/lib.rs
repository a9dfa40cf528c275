//! # shirtsheets-data
//!
//! Aggregate shirt-trade listings from many seller spreadsheets into one CSV.
//!
//! ## Features
//!
//! - **Sheet catalog**: per-year JSON list of spreadsheets and their column layout
//! - **Column addressing**: single-letter and compound column references
//! - **Row exclusion**: `"2,10:12,40:"`-style specs per sheet
//! - **Sources**: read `.xlsx` workbooks via `calamine` or CSV exports; hosted
//!   providers plug in through [`SheetSource`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use shirtsheets_data::{AggregateEngine, XlsxSource};
//!
//! let source = XlsxSource::new("sheets")?;
//! let summary = AggregateEngine::aggregate_files(
//!     "in/shirt-sheets-2024.json",
//!     "out/shirts-2024.csv",
//!     &source,
//! )?;
//! println!("{} listings", summary.total_listings());
//! ```

pub mod aggregate;
pub mod column;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod extract;
pub mod output;
pub mod range;
pub mod sources;

use std::fs;
use std::path::Path;

// Re-exports
pub use aggregate::{Aggregator, RunSummary, SheetReport};
pub use column::{bounding_span, letter_code, ColumnSpan};
pub use config::{catalog_file_name, load_catalog, parse_catalog, SheetConfig};
pub use error::{DataError, Result};
pub use exclusion::{ExclusionRule, RowExclusions};
pub use extract::{extract_field, Listing, RawRow, RecordExtractor, LISTING_HEADER};
pub use output::{output_file_name, ListingWriter};
pub use range::FetchRange;
pub use sources::{CsvOptions, CsvSource, SheetSource, XlsxSource};

/// Entry points for whole-file aggregation runs
pub struct AggregateEngine;

impl AggregateEngine {
    /// Aggregate every sheet of a catalog file into a CSV file
    ///
    /// # Arguments
    /// * `catalog` - Path to the JSON sheet catalog
    /// * `output` - Path of the CSV to create; its directory is created if missing
    /// * `source` - Where sheet rows are fetched from
    ///
    /// # Returns
    /// Per-sheet counts and totals of the run
    pub fn aggregate_files<S: SheetSource>(
        catalog: impl AsRef<Path>,
        output: impl AsRef<Path>,
        source: S,
    ) -> Result<RunSummary> {
        let sheets = load_catalog(catalog)?;

        let output = output.as_ref();
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = ListingWriter::create(output)?;
        let summary = Aggregator::new(source).run(&sheets, &mut writer)?;
        writer.into_inner()?;
        Ok(summary)
    }
}
