//! CSV sheet source.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{DataError, Result};
use crate::extract::RawRow;
use crate::range::FetchRange;
use crate::sources::{crop, split_sheet_id, SheetSource};

/// Options for CSV parsing
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvOptions {
    /// Default options with a different field delimiter
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Default::default()
        }
    }
}

/// Directory of CSV sheet exports, one `<id>.csv` per sheet identifier
///
/// A `!Worksheet` suffix on the identifier is accepted and ignored.
pub struct CsvSource {
    root: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Create a new CSV source reading from `root`
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(root, CsvOptions::default())
    }

    /// Create a new CSV source with custom options
    pub fn with_options(root: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(DataError::FileNotFound(root.display().to_string()));
        }
        Ok(Self {
            root: root.to_path_buf(),
            options,
        })
    }

    /// Export path for a sheet identifier
    pub fn export_path(&self, sheet_id: &str) -> PathBuf {
        let (book, _) = split_sheet_id(sheet_id);
        self.root.join(format!("{}.csv", book))
    }

    /// Read every record of a CSV export
    fn read_all(&self, path: &Path) -> Result<Vec<RawRow>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut result = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            result.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(result)
    }
}

impl SheetSource for CsvSource {
    fn fetch_range(&self, sheet_id: &str, range: &str) -> Result<Vec<RawRow>> {
        let range: FetchRange = range.parse()?;
        let path = self.export_path(sheet_id);

        if !path.exists() {
            return Err(DataError::fetch(
                sheet_id,
                format!("export not found: {}", path.display()),
            ));
        }

        let data = self
            .read_all(&path)
            .map_err(|e| DataError::fetch(sheet_id, e))?;
        let last_row = data.len().checked_sub(1).map(|row| row as u32);

        Ok(crop(&range, last_row, |row, col| {
            data.get(row as usize)?.get(col as usize).cloned()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn source_with(name: &str, content: &str) -> (TempDir, CsvSource) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(name), content).unwrap();
        let source = CsvSource::new(dir.path()).unwrap();
        (dir, source)
    }

    #[test]
    fn test_fetch_open_range() {
        let (_dir, source) = source_with(
            "S1.csv",
            "Num,Name,Size\n118,Robonauts,L\n254,Cheesy Poofs,M\n",
        );

        let rows = source.fetch_range("S1", "A2:C").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["118", "Robonauts", "L"]);
        assert_eq!(rows[1], vec!["254", "Cheesy Poofs", "M"]);
    }

    #[test]
    fn test_fetch_column_window() {
        let (_dir, source) = source_with("S1.csv", "a,b,c,d\ne,f,g,h\n");

        let rows = source.fetch_range("S1", "B1:C").unwrap();
        assert_eq!(rows, vec![vec!["b", "c"], vec!["f", "g"]]);
    }

    #[test]
    fn test_fetch_ragged_rows() {
        let (_dir, source) = source_with("S1.csv", "a,,\n,\nb\n,,\n");

        let rows = source.fetch_range("S1", "A1:C").unwrap();
        assert_eq!(rows, vec![vec!["a".to_string()], vec![], vec!["b".to_string()]]);
    }

    #[test]
    fn test_fetch_quoted_fields() {
        let (_dir, source) = source_with(
            "S1.csv",
            "\"118 - Robonauts\",\"Shirt, blue\"\n",
        );

        let rows = source.fetch_range("S1", "A1:B").unwrap();
        assert_eq!(rows[0], vec!["118 - Robonauts", "Shirt, blue"]);
    }

    #[test]
    fn test_fetch_tsv() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("S1.csv"), "a\tb\n").unwrap();
        let options = CsvOptions::with_delimiter(b'\t');
        let source = CsvSource::with_options(dir.path(), options).unwrap();

        let rows = source.fetch_range("S1", "A1:B").unwrap();
        assert_eq!(rows, vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_fetch_missing_export() {
        let (_dir, source) = source_with("S1.csv", "a\n");
        let err = source.fetch_range("S2", "A1:B").unwrap_err();
        assert!(matches!(err, DataError::Fetch { ref sheet, .. } if sheet == "S2"));
    }

    #[test]
    fn test_fetch_invalid_range() {
        let (_dir, source) = source_with("S1.csv", "a\n");
        assert!(matches!(
            source.fetch_range("S1", "A1"),
            Err(DataError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_missing_directory() {
        assert!(CsvSource::new("/nonexistent/exports").is_err());
    }
}
