//! Row to listing extraction.
//!
//! A fetched row starts at the sheet's leftmost referenced column, so a
//! letter's position in the row is its code minus that column's code.
//! References longer than one character name several columns separated by
//! one delimiter character each (`"E,G"`, `"A B"`); their values are joined
//! with single spaces.

use crate::column::letter_code;
use crate::config::SheetConfig;

/// One row of cell text as returned by a source
pub type RawRow = Vec<String>;

/// Column headers of the aggregated CSV
pub const LISTING_HEADER: [&str; 7] = [
    "Team Number",
    "Team Name",
    "Size",
    "Year",
    "Description",
    "Seller",
    "Contact",
];

/// A normalized shirt listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub team_number: String,
    pub team_name: String,
    pub size: String,
    pub year: String,
    pub description: String,
    pub seller: String,
    pub contact: String,
}

impl Listing {
    /// Fields in [`LISTING_HEADER`] order
    pub fn fields(&self) -> [&str; 7] {
        [
            self.team_number.as_str(),
            self.team_name.as_str(),
            self.size.as_str(),
            self.year.as_str(),
            self.description.as_str(),
            self.seller.as_str(),
            self.contact.as_str(),
        ]
    }
}

/// Extract the value of `column_ref` from a row whose first cell is column
/// `first_col` (a letter code).
///
/// Empty references and columns outside the row yield an empty string.
pub fn extract_field(row: &[String], first_col: u8, column_ref: &str) -> String {
    if column_ref.is_empty() {
        return String::new();
    }

    let mut pieces: Vec<&str> = column_ref
        .chars()
        .step_by(2)
        .map(|letter| cell_text(row, first_col, letter))
        .collect();

    // A trailing delimiter contributes one empty piece
    if column_ref.chars().count() % 2 == 0 {
        pieces.push("");
    }

    pieces.join(" ")
}

fn cell_text(row: &[String], first_col: u8, letter: char) -> &str {
    letter_code(letter)
        .and_then(|code| code.checked_sub(first_col))
        .and_then(|offset| row.get(usize::from(offset)))
        .map_or("", String::as_str)
}

/// Builds listings from one sheet's rows
#[derive(Debug, Clone, Copy)]
pub struct RecordExtractor<'a> {
    sheet: &'a SheetConfig,
    first_col: u8,
}

impl<'a> RecordExtractor<'a> {
    /// `first_col` is the letter code of the first column in every row
    pub fn new(sheet: &'a SheetConfig, first_col: u8) -> Self {
        Self { sheet, first_col }
    }

    fn field(&self, row: &[String], column_ref: &str) -> String {
        extract_field(row, self.first_col, column_ref)
    }

    /// Build the listing for a row, or `None` when the row has no team
    /// number, team name or description.
    pub fn extract(&self, row: &[String]) -> Option<Listing> {
        let mut team_number = self.field(row, &self.sheet.team_num_col);
        let mut team_name = self.field(row, &self.sheet.team_name_col);
        let description = self.field(row, &self.sheet.desc_col);

        if self.sheet.has_combined_team_column() {
            if let Some((number, name)) = split_team(&team_number) {
                team_number = number;
                team_name = name;
            }
        }

        if team_number.trim().is_empty()
            && team_name.trim().is_empty()
            && description.trim().is_empty()
        {
            return None;
        }

        Some(Listing {
            team_number,
            team_name,
            size: self.field(row, &self.sheet.size_col),
            year: self.field(row, &self.sheet.year_col),
            description,
            seller: self.sheet.seller.clone(),
            contact: self.sheet.contact.clone(),
        })
    }
}

/// Split "118 - Robonauts" on its first hyphen
fn split_team(cell: &str) -> Option<(String, String)> {
    cell.split_once('-')
        .map(|(number, name)| (number.trim().to_string(), name.trim().to_string()))
}
