//! Sheet source implementations.
//!
//! A source answers range requests for sheet identifiers. Hosted spreadsheet
//! services implement [`SheetSource`] outside this crate; the local sources
//! here read workbooks or CSV exports from a directory, one file per sheet.

pub mod csv;
pub mod excel;

pub use csv::{CsvOptions, CsvSource};
pub use excel::XlsxSource;

use crate::error::Result;
use crate::extract::RawRow;
use crate::range::FetchRange;

/// Something that can return the cells of a sheet range
pub trait SheetSource {
    /// Fetch a range of a sheet
    ///
    /// # Arguments
    /// * `sheet_id` - Sheet identifier from the catalog
    /// * `range` - Range in A1 notation, e.g. `"A1:E"` (to the last populated row)
    ///
    /// # Returns
    /// Rows of cell text. Trailing empty cells of a row and trailing empty
    /// rows are omitted.
    fn fetch_range(&self, sheet_id: &str, range: &str) -> Result<Vec<RawRow>>;
}

impl<S: SheetSource + ?Sized> SheetSource for &S {
    fn fetch_range(&self, sheet_id: &str, range: &str) -> Result<Vec<RawRow>> {
        (**self).fetch_range(sheet_id, range)
    }
}

impl<S: SheetSource + ?Sized> SheetSource for Box<S> {
    fn fetch_range(&self, sheet_id: &str, range: &str) -> Result<Vec<RawRow>> {
        (**self).fetch_range(sheet_id, range)
    }
}

/// Split `"book!Sheet"` into the file stem and an optional worksheet name
pub(crate) fn split_sheet_id(sheet_id: &str) -> (&str, Option<&str>) {
    match sheet_id.split_once('!') {
        Some((book, sheet)) if !sheet.is_empty() => (book, Some(sheet)),
        Some((book, _)) => (book, None),
        None => (sheet_id, None),
    }
}

/// Copy `range` out of a grid, reading rows up to `last_row` (0-indexed,
/// inclusive) when the range is open-ended.
pub(crate) fn crop<F>(range: &FetchRange, last_row: Option<u32>, cell: F) -> Vec<RawRow>
where
    F: Fn(u32, u32) -> Option<String>,
{
    let Some(last_row) = range.end_row.or(last_row) else {
        return Vec::new();
    };

    let rows = (range.start_row..=last_row)
        .map(|row| {
            (range.start_col..=range.end_col)
                .map(|col| cell(row, col).unwrap_or_default())
                .collect()
        })
        .collect();

    trim_ragged(rows)
}

/// Drop trailing empty cells of every row and trailing empty rows
pub(crate) fn trim_ragged(mut rows: Vec<RawRow>) -> Vec<RawRow> {
    for row in &mut rows {
        while row.last().is_some_and(|cell| cell.is_empty()) {
            row.pop();
        }
    }
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    rows
}
