//! Column letter addressing.
//!
//! Column references in a sheet configuration are addressed by the ASCII code
//! of their letter (`A` = 65, `Z` = 90). Codes are only ever compared or
//! subtracted from each other, so the raw code orders columns and locates a
//! cell relative to the first fetched column without any rebasing.

/// Code of a single uppercase column letter, `None` for anything else
pub fn letter_code(letter: char) -> Option<u8> {
    letter.is_ascii_uppercase().then_some(letter as u8)
}

/// Inclusive span of column letters covered by a sheet's references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    /// Code of the leftmost referenced letter
    pub first: u8,
    /// Code of the rightmost referenced letter
    pub last: u8,
}

impl ColumnSpan {
    /// Leftmost column letter
    pub fn first_letter(&self) -> char {
        char::from(self.first)
    }

    /// Rightmost column letter
    pub fn last_letter(&self) -> char {
        char::from(self.last)
    }

    fn include(self, code: u8) -> Self {
        Self {
            first: self.first.min(code),
            last: self.last.max(code),
        }
    }
}

/// Compute the minimal span covering every letter in `refs`.
///
/// Letters inside compound references count as well; separators and any
/// other non-letter characters are ignored. Returns `None` when no reference
/// contains a letter.
pub fn bounding_span<'a, I>(refs: I) -> Option<ColumnSpan>
where
    I: IntoIterator<Item = &'a str>,
{
    refs.into_iter()
        .flat_map(str::chars)
        .filter_map(letter_code)
        .fold(None, |span: Option<ColumnSpan>, code| {
            Some(match span {
                Some(span) => span.include(code),
                None => ColumnSpan {
                    first: code,
                    last: code,
                },
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_code() {
        assert_eq!(letter_code('A'), Some(65));
        assert_eq!(letter_code('Z'), Some(90));
        assert_eq!(letter_code('a'), None);
        assert_eq!(letter_code(','), None);
        assert_eq!(letter_code('1'), None);
    }

    #[test]
    fn test_bounding_span_simple() {
        let span = bounding_span(["A", "B", "C", "D", "E"]).unwrap();
        assert_eq!(span.first_letter(), 'A');
        assert_eq!(span.last_letter(), 'E');
    }

    #[test]
    fn test_bounding_span_unordered_with_gaps() {
        let span = bounding_span(["F", "", "C", "", "H"]).unwrap();
        assert_eq!(span.first_letter(), 'C');
        assert_eq!(span.last_letter(), 'H');
    }

    #[test]
    fn test_bounding_span_compound_reference() {
        // Letters inside "B,G" widen the span; the comma is ignored
        let span = bounding_span(["C", "B,G", "D"]).unwrap();
        assert_eq!(span.first_letter(), 'B');
        assert_eq!(span.last_letter(), 'G');
    }

    #[test]
    fn test_bounding_span_single_column() {
        let span = bounding_span(["A", "A", "", "", "A"]).unwrap();
        assert_eq!(span.first_letter(), 'A');
        assert_eq!(span.last_letter(), 'A');
    }

    #[test]
    fn test_bounding_span_descending_values_update_max() {
        // First letter seen sets both bounds; later ones move each side
        let span = bounding_span(["D", "B", "F"]).unwrap();
        assert_eq!((span.first, span.last), (b'B', b'F'));
    }

    #[test]
    fn test_bounding_span_empty() {
        assert_eq!(bounding_span(["", "", ""]), None);
        assert_eq!(bounding_span(["1", "-"]), None);
        assert_eq!(bounding_span(Vec::<&str>::new()), None);
    }
}
