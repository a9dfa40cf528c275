//! Sheet catalog configuration.
//!
//! Each year has a JSON catalog listing one entry per seller spreadsheet:
//!
//! ```json
//! [
//!   {
//!     "id": "1AbC...",
//!     "seller": "Team 254",
//!     "contact": "@poofs",
//!     "startRow": "3",
//!     "excludeRows": "10:12,40:",
//!     "teamNumCol": "A",
//!     "teamNameCol": "B",
//!     "sizeCol": "C",
//!     "yearCol": "D",
//!     "descCol": "E,F"
//!   }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::column::{bounding_span, ColumnSpan};
use crate::error::{DataError, Result};
use crate::exclusion::RowExclusions;

/// File name of the sheet catalog for a year
pub fn catalog_file_name(year: &str) -> String {
    format!("shirt-sheets-{}.json", year)
}

/// One seller's spreadsheet and its column layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetConfig {
    /// Spreadsheet identifier handed to the source
    pub id: String,
    pub seller: String,
    pub contact: String,
    /// First data row; empty means row 1
    pub start_row: String,
    /// Exclusion spec, see [`RowExclusions`]
    pub exclude_rows: String,
    pub team_num_col: String,
    pub team_name_col: String,
    pub size_col: String,
    pub year_col: String,
    pub desc_col: String,
}

impl SheetConfig {
    /// All column references of the sheet, in output field order
    pub fn column_refs(&self) -> [&str; 5] {
        [
            self.team_num_col.as_str(),
            self.team_name_col.as_str(),
            self.size_col.as_str(),
            self.year_col.as_str(),
            self.desc_col.as_str(),
        ]
    }

    /// 1-based number of the first data row
    pub fn first_row(&self) -> Result<u32> {
        let raw = self.start_row.trim();
        if raw.is_empty() {
            return Ok(1);
        }
        match raw.parse::<u32>() {
            Ok(row) if row > 0 => Ok(row),
            _ => Err(DataError::InvalidStartRow {
                sheet: self.id.clone(),
                row: self.start_row.clone(),
            }),
        }
    }

    /// Columns that must be fetched to serve every reference
    pub fn column_span(&self) -> Result<ColumnSpan> {
        bounding_span(self.column_refs()).ok_or_else(|| DataError::NoColumns(self.id.clone()))
    }

    pub fn exclusions(&self) -> Result<RowExclusions> {
        RowExclusions::parse(&self.exclude_rows)
    }

    /// Team number and name share one cell ("254 - The Cheesy Poofs")
    pub fn has_combined_team_column(&self) -> bool {
        self.team_num_col == self.team_name_col
    }
}

/// Parse a JSON sheet catalog
pub fn parse_catalog(json: &str) -> Result<Vec<SheetConfig>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse the sheet catalog at `path`
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<SheetConfig>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| DataError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {
            "id": "S1",
            "seller": "Team 118",
            "contact": "trades@example.com",
            "startRow": "3",
            "excludeRows": "5,9:",
            "teamNumCol": "B",
            "teamNameCol": "B",
            "sizeCol": "D",
            "yearCol": "",
            "descCol": "E,G"
        },
        {
            "id": "S2",
            "seller": "Team 254",
            "teamNumCol": "A"
        }
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let sheets = parse_catalog(CATALOG).unwrap();
        assert_eq!(sheets.len(), 2);

        let first = &sheets[0];
        assert_eq!(first.id, "S1");
        assert_eq!(first.start_row, "3");
        assert_eq!(first.exclude_rows, "5,9:");
        assert_eq!(first.desc_col, "E,G");
        assert!(first.has_combined_team_column());

        let second = &sheets[1];
        assert_eq!(second.contact, "");
        assert_eq!(second.start_row, "");
        assert_eq!(second.team_name_col, "");
    }

    #[test]
    fn test_first_row() {
        let sheets = parse_catalog(CATALOG).unwrap();
        assert_eq!(sheets[0].first_row().unwrap(), 3);
        assert_eq!(sheets[1].first_row().unwrap(), 1);

        let bad = SheetConfig {
            start_row: "x".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            bad.first_row(),
            Err(DataError::InvalidStartRow { .. })
        ));

        let zero = SheetConfig {
            start_row: "0".to_string(),
            ..Default::default()
        };
        assert!(zero.first_row().is_err());
    }

    #[test]
    fn test_column_span() {
        let sheets = parse_catalog(CATALOG).unwrap();
        let span = sheets[0].column_span().unwrap();
        assert_eq!((span.first_letter(), span.last_letter()), ('B', 'G'));

        let span = sheets[1].column_span().unwrap();
        assert_eq!((span.first_letter(), span.last_letter()), ('A', 'A'));
    }

    #[test]
    fn test_column_span_without_columns() {
        let sheet = SheetConfig {
            id: "empty".to_string(),
            ..Default::default()
        };
        assert!(matches!(sheet.column_span(), Err(DataError::NoColumns(id)) if id == "empty"));
    }

    #[test]
    fn test_malformed_catalog() {
        assert!(matches!(
            parse_catalog("{ not json"),
            Err(DataError::ConfigParse(_))
        ));
        assert!(parse_catalog(r#"{"id": "S1"}"#).is_err());
    }

    #[test]
    fn test_missing_catalog() {
        let err = load_catalog("/nonexistent/shirt-sheets-2024.json").unwrap_err();
        assert!(matches!(err, DataError::ConfigRead { .. }));
        assert!(err.to_string().contains("shirt-sheets-2024.json"));
    }

    #[test]
    fn test_catalog_file_name() {
        assert_eq!(catalog_file_name("2024"), "shirt-sheets-2024.json");
    }
}
