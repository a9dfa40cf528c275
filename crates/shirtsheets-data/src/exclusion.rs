//! Row exclusion rules.
//!
//! An exclusion spec is a comma-separated list of terms. Each term is either a
//! single row number (`7`) or a range with optional bounds (`3:5`, `:10`,
//! `40:`). Row numbers are the 1-based numbers shown in the spreadsheet.

use std::str::FromStr;

use crate::error::{DataError, Result};

/// One parsed exclusion term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionRule {
    /// Exactly this row
    Exact(i64),
    /// Rows `lo..=hi`
    Range(i64, i64),
    /// Rows from `lo` onwards
    From(i64),
    /// Rows up to and including `hi`
    To(i64),
}

impl ExclusionRule {
    /// Check whether a row number falls under this rule
    pub fn matches(&self, row: i64) -> bool {
        match *self {
            ExclusionRule::Exact(n) => row == n,
            ExclusionRule::Range(lo, hi) => (lo..=hi).contains(&row),
            ExclusionRule::From(lo) => row >= lo,
            ExclusionRule::To(hi) => (0..=hi).contains(&row),
        }
    }
}

/// Ordered set of exclusion rules for one sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowExclusions {
    rules: Vec<ExclusionRule>,
}

impl RowExclusions {
    /// Parse an exclusion spec; an empty spec excludes nothing
    pub fn parse(spec: &str) -> Result<Self> {
        let mut rules = Vec::new();

        for term in spec.split(',').map(str::trim) {
            if term.is_empty() {
                continue;
            }

            let rule = match term.split_once(':') {
                Some((lower, upper)) => {
                    let lower = parse_bound(spec, lower.trim())?;
                    let upper = parse_bound(spec, upper.trim())?;
                    match (lower, upper) {
                        (Some(lo), Some(hi)) => ExclusionRule::Range(lo, hi),
                        (Some(lo), None) => ExclusionRule::From(lo),
                        (None, Some(hi)) => ExclusionRule::To(hi),
                        (None, None) => ExclusionRule::From(0),
                    }
                }
                None => match parse_bound(spec, term)? {
                    Some(n) => ExclusionRule::Exact(n),
                    None => continue,
                },
            };
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    /// Check whether a row number is excluded by any rule
    pub fn is_excluded(&self, row: i64) -> bool {
        self.rules.iter().any(|rule| rule.matches(row))
    }

    /// Parsed rules in spec order
    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    /// True when the spec excludes no rows
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromStr for RowExclusions {
    type Err = DataError;

    fn from_str(spec: &str) -> Result<Self> {
        Self::parse(spec)
    }
}

fn parse_bound(spec: &str, term: &str) -> Result<Option<i64>> {
    if term.is_empty() {
        return Ok(None);
    }
    term.parse::<i64>()
        .map(Some)
        .map_err(|_| DataError::ExclusionParse {
            spec: spec.to_string(),
            term: term.to_string(),
        })
}
