//! Aggregated CSV output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{DataError, Result};
use crate::extract::{Listing, LISTING_HEADER};

/// File name of the aggregated listings for a year
pub fn output_file_name(year: &str) -> String {
    format!("shirts-{}.csv", year)
}

/// CSV writer that flushes after every listing, so an aborted run still
/// leaves every listing written so far on disk.
pub struct ListingWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ListingWriter<File> {
    /// Create (or truncate) the output file and write the header row
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Self::new(file)
    }
}

impl<W: Write> ListingWriter<W> {
    /// Wrap a stream and write the header row
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(LISTING_HEADER)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Append one listing and flush it
    pub fn write(&mut self, listing: &Listing) -> Result<()> {
        self.writer.write_record(listing.fields())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying stream
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| DataError::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(number: &str, description: &str) -> Listing {
        Listing {
            team_number: number.to_string(),
            team_name: "Robonauts".to_string(),
            size: "L".to_string(),
            year: "2024".to_string(),
            description: description.to_string(),
            seller: "Team 118".to_string(),
            contact: "trades@example.com".to_string(),
        }
    }

    #[test]
    fn test_header_only() {
        let writer = ListingWriter::new(Vec::new()).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec!["Team Number,Team Name,Size,Year,Description,Seller,Contact"]
        );
    }

    #[test]
    fn test_write_listings() {
        let mut writer = ListingWriter::new(Vec::new()).unwrap();
        writer.write(&listing("118", "Blue shirt")).unwrap();
        writer.write(&listing("118", "Shirt, with comma")).unwrap();

        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "118,Robonauts,L,2024,Blue shirt,Team 118,trades@example.com"
        );
        assert_eq!(
            lines[2],
            "118,Robonauts,L,2024,\"Shirt, with comma\",Team 118,trades@example.com"
        );
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("2024"), "shirts-2024.csv");
    }
}
