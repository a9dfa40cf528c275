//! A1-style fetch ranges.
//!
//! The aggregator asks sources for `<col><row>:<col>` ranges, which run from a
//! start cell to the last populated row of the end column. A closed form
//! (`A2:E40`) is accepted as well.

use std::fmt;
use std::str::FromStr;

use crate::column::ColumnSpan;
use crate::error::{DataError, Result};

/// Rectangular range with an optional end row, all positions 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRange {
    pub start_col: u32,
    pub start_row: u32,
    pub end_col: u32,
    /// `None` reads to the last populated row
    pub end_row: Option<u32>,
}

impl FetchRange {
    /// Open-ended range covering `span`, starting at 1-based `first_row`
    pub fn open(span: ColumnSpan, first_row: u32) -> Self {
        Self {
            start_col: u32::from(span.first - b'A'),
            start_row: first_row.saturating_sub(1),
            end_col: u32::from(span.last - b'A'),
            end_row: None,
        }
    }

    /// Parse a cell reference like "A1" into (column, row) as 0-indexed.
    ///
    /// The row part may be omitted when `row_optional` is set.
    fn parse_cell_ref(cell: &str, row_optional: bool) -> Result<(u32, Option<u32>)> {
        let cell = cell.trim().to_uppercase();

        if cell.is_empty() {
            return Err(DataError::InvalidRange("Empty cell reference".to_string()));
        }

        let mut col_str = String::new();
        let mut row_str = String::new();

        for c in cell.chars() {
            if c.is_ascii_alphabetic() && row_str.is_empty() {
                col_str.push(c);
            } else if c.is_ascii_digit() {
                row_str.push(c);
            } else {
                return Err(DataError::InvalidRange(format!(
                    "Invalid character '{}' in cell reference",
                    c
                )));
            }
        }

        if col_str.is_empty() || (row_str.is_empty() && !row_optional) {
            return Err(DataError::InvalidRange(format!(
                "Invalid cell reference '{}'",
                cell
            )));
        }

        let col = column_to_index(&col_str)?;

        if row_str.is_empty() {
            return Ok((col, None));
        }

        let row: u32 = row_str
            .parse::<u32>()
            .map_err(|_| DataError::InvalidRange(format!("Invalid row number '{}'", row_str)))?;

        if row == 0 {
            return Err(DataError::InvalidRange(
                "Row number must be >= 1".to_string(),
            ));
        }

        Ok((col, Some(row - 1)))
    }
}

impl FromStr for FetchRange {
    type Err = DataError;

    fn from_str(range: &str) -> Result<Self> {
        let parts: Vec<&str> = range.split(':').collect();

        if parts.len() != 2 {
            return Err(DataError::InvalidRange(format!(
                "Expected format 'A1:B' or 'A1:B2', got '{}'",
                range
            )));
        }

        let (start_col, start_row) = Self::parse_cell_ref(parts[0], false)?;
        let (end_col, end_row) = Self::parse_cell_ref(parts[1], true)?;
        // parse_cell_ref guarantees a row when it is not optional
        let start_row = start_row.unwrap_or_default();

        if end_col < start_col || end_row.is_some_and(|end| end < start_row) {
            return Err(DataError::InvalidRange(format!(
                "Range '{}' ends before it starts",
                range
            )));
        }

        Ok(Self {
            start_col,
            start_row,
            end_col,
            end_row,
        })
    }
}

impl fmt::Display for FetchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}",
            index_to_column(self.start_col),
            self.start_row + 1,
            index_to_column(self.end_col)
        )?;
        if let Some(end_row) = self.end_row {
            write!(f, "{}", end_row + 1)?;
        }
        Ok(())
    }
}

/// Convert column letters to 0-indexed number (A=0, B=1, ..., Z=25, AA=26)
pub fn column_to_index(col: &str) -> Result<u32> {
    let mut result: u32 = 0;
    for c in col.chars() {
        if !c.is_ascii_uppercase() {
            return Err(DataError::InvalidRange(format!("Invalid column '{}'", col)));
        }
        let value = c as u32 - 'A' as u32 + 1;
        result = result
            .checked_mul(26)
            .and_then(|r| r.checked_add(value))
            .ok_or_else(|| DataError::InvalidRange(format!("Column '{}' is too wide", col)))?;
    }
    if result == 0 {
        return Err(DataError::InvalidRange("Empty column".to_string()));
    }
    Ok(result - 1)
}

/// Convert a 0-indexed column number back to letters
pub fn index_to_column(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
