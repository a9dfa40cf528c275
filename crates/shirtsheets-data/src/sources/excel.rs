//! Excel/XLSX sheet source using calamine.

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, ExcelDateTime, Range, Reader, Xlsx, XlsxError};
use chrono::Timelike;
use tracing::debug;

use crate::error::{DataError, Result};
use crate::extract::RawRow;
use crate::range::FetchRange;
use crate::sources::{crop, split_sheet_id, SheetSource};

/// Directory of `.xlsx` workbooks, one per sheet identifier
///
/// The identifier `book` reads the first worksheet of `book.xlsx`;
/// `book!Trades` reads its `Trades` worksheet.
pub struct XlsxSource {
    root: PathBuf,
}

impl XlsxSource {
    /// Create a new source reading workbooks from `root`
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(DataError::FileNotFound(root.display().to_string()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Workbook path for a sheet identifier
    pub fn workbook_path(&self, sheet_id: &str) -> PathBuf {
        let (book, _) = split_sheet_id(sheet_id);
        self.root.join(format!("{}.xlsx", book))
    }

    /// Convert a calamine cell to a string
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                // Team numbers and years are stored as whole floats
                if f.fract() == 0.0 {
                    format!("{:.0}", f)
                } else {
                    f.to_string()
                }
            }
            Data::Bool(b) => b.to_string(),
            Data::Error(e) => format!("#ERROR: {:?}", e),
            Data::DateTime(dt) => Self::datetime_to_string(dt),
            Data::DateTimeIso(s) => s.clone(),
            Data::DurationIso(s) => s.clone(),
        }
    }

    /// Date cells as `YYYY-MM-DD`, with the time appended when it is not midnight
    fn datetime_to_string(dt: &ExcelDateTime) -> String {
        match dt.as_datetime() {
            Some(value) if value.num_seconds_from_midnight() == 0 => {
                value.format("%Y-%m-%d").to_string()
            }
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        }
    }

    /// Extract the requested cells, addressing the worksheet absolutely
    fn extract_range_data(cells: &Range<Data>, range: &FetchRange) -> Vec<RawRow> {
        let last_row = cells.end().map(|(row, _)| row);
        crop(range, last_row, |row, col| {
            cells.get_value((row, col)).map(Self::cell_to_string)
        })
    }
}

impl SheetSource for XlsxSource {
    fn fetch_range(&self, sheet_id: &str, range: &str) -> Result<Vec<RawRow>> {
        let range: FetchRange = range.parse()?;
        let path = self.workbook_path(sheet_id);

        if !path.exists() {
            return Err(DataError::fetch(
                sheet_id,
                format!("workbook not found: {}", path.display()),
            ));
        }

        let mut workbook: Xlsx<_> = open_workbook(&path)
            .map_err(|e: XlsxError| DataError::fetch(sheet_id, e))?;

        let sheet_name = match split_sheet_id(sheet_id).1 {
            Some(name) => name.to_string(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| DataError::fetch(sheet_id, "workbook has no sheets"))?,
        };

        let cells = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| DataError::fetch(sheet_id, format!("{}: {}", sheet_name, e)))?;

        debug!(
            "Read worksheet '{}' of {} ({:?} used cells)",
            sheet_name,
            path.display(),
            cells.get_size()
        );

        Ok(Self::extract_range_data(&cells, &range))
    }
}
