//! Sheet aggregation.
//!
//! For every configured sheet the aggregator computes the fetch range from the
//! column references, fetches the rows, drops excluded and blank rows, and
//! writes one listing per remaining row. Sheets are processed in catalog
//! order and rows in sheet order. The first error aborts the run.

use std::io::Write;

use tracing::{debug, info};

use crate::config::SheetConfig;
use crate::error::{DataError, Result};
use crate::extract::RecordExtractor;
use crate::output::ListingWriter;
use crate::range::FetchRange;
use crate::sources::SheetSource;

/// What happened to the rows of one sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetReport {
    pub sheet_id: String,
    pub seller: String,
    /// Range requested from the source
    pub range: String,
    pub rows_fetched: usize,
    pub rows_excluded: usize,
    pub rows_blank: usize,
    pub listings_written: usize,
}

/// Totals of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sheets: Vec<SheetReport>,
}

impl RunSummary {
    pub fn sheets_processed(&self) -> usize {
        self.sheets.len()
    }

    pub fn total_listings(&self) -> usize {
        self.sheets.iter().map(|s| s.listings_written).sum()
    }
}

/// Drives one aggregation run over a sheet source
pub struct Aggregator<S> {
    source: S,
}

impl<S: SheetSource> Aggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Aggregate every sheet into `writer`
    pub fn run<W: Write>(
        &self,
        sheets: &[SheetConfig],
        writer: &mut ListingWriter<W>,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for sheet in sheets {
            let report = self.aggregate_sheet(sheet, writer)?;
            info!(
                "{} listings for seller \"{}\" written to CSV",
                report.listings_written, report.seller
            );
            summary.sheets.push(report);
        }

        info!(
            "{} total listings written for {} sellers",
            summary.total_listings(),
            summary.sheets_processed()
        );

        Ok(summary)
    }

    fn aggregate_sheet<W: Write>(
        &self,
        sheet: &SheetConfig,
        writer: &mut ListingWriter<W>,
    ) -> Result<SheetReport> {
        let span = sheet.column_span()?;
        let first_row = sheet.first_row()?;
        let exclusions = sheet.exclusions()?;
        let range = FetchRange::open(span, first_row).to_string();

        if !exclusions.is_empty() {
            debug!("Excluding rows {:?} for {}", exclusions.rules(), sheet.id);
        }
        info!("Retrieving data of range {} for {}", range, sheet.id);
        let rows = self.source.fetch_range(&sheet.id, &range)?;

        let mut report = SheetReport {
            sheet_id: sheet.id.clone(),
            seller: sheet.seller.clone(),
            range,
            rows_fetched: rows.len(),
            ..Default::default()
        };

        let extractor = RecordExtractor::new(sheet, span.first);

        for (offset, row) in rows.iter().enumerate() {
            let row_number = i64::from(first_row) + offset as i64;

            if exclusions.is_excluded(row_number) {
                debug!("Row {} was marked as excluded. Skipping.", row_number);
                report.rows_excluded += 1;
                continue;
            }

            let Some(listing) = extractor.extract(row) else {
                debug!("Data array for row {} was empty. Skipping.", row_number);
                report.rows_blank += 1;
                continue;
            };

            writer.write(&listing).map_err(|e| DataError::Write {
                sheet: sheet.id.clone(),
                message: e.to_string(),
            })?;
            report.listings_written += 1;
        }

        Ok(report)
    }
}
