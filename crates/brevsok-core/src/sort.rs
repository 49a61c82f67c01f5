//! Deterministic ordering of filtered results.
//!
//! All sorts are stable: ties keep corpus order. Date keys compare the raw
//! `LetterDate` strings, which the export stores zero-padded ISO-like, so
//! lexicographic order is chronological order. Letters without a date sort
//! last in both date directions.

use crate::types::{fields, LetterDocument};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Selectable sort key for the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Oldest first (the default)
    #[default]
    DateAsc,
    /// Newest first
    DateDesc,
    /// By first creator, translator credits excluded
    Creator,
    /// By first location value
    Location,
    /// By first destination value
    Destination,
    /// Longest letter text first
    Length,
}

impl SortKey {
    /// The string form used in query strings and on the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::Creator => "creator",
            SortKey::Location => "location",
            SortKey::Destination => "destination",
            SortKey::Length => "length",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date-asc" => Ok(SortKey::DateAsc),
            "date-desc" => Ok(SortKey::DateDesc),
            "creator" => Ok(SortKey::Creator),
            "location" => Ok(SortKey::Location),
            "destination" => Ok(SortKey::Destination),
            "length" => Ok(SortKey::Length),
            _ => Err(format!("unknown sort key: {}", s)),
        }
    }
}

/// Sort the candidate list in place by the given key (stable).
pub fn sort_documents(docs: &mut [&LetterDocument], key: SortKey) {
    match key {
        SortKey::DateAsc => docs.sort_by(|a, b| compare_dates(a, b, false)),
        SortKey::DateDesc => docs.sort_by(|a, b| compare_dates(a, b, true)),
        SortKey::Creator => docs.sort_by_key(|d| first_creator(d)),
        SortKey::Location => docs.sort_by_key(|d| first_field(d, fields::LOCATION)),
        SortKey::Destination => docs.sort_by_key(|d| first_field(d, fields::DESTINATION)),
        SortKey::Length => docs.sort_by_key(|d| std::cmp::Reverse(d.text_len())),
    }
}

fn compare_dates(a: &LetterDocument, b: &LetterDocument, descending: bool) -> Ordering {
    let date_a = a.letter_date();
    let date_b = b.letter_date();
    match (date_a.is_empty(), date_b.is_empty()) {
        (true, true) => Ordering::Equal,
        // Empty dates sort last regardless of direction
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            if descending {
                date_b.cmp(date_a)
            } else {
                date_a.cmp(date_b)
            }
        }
    }
}

fn first_creator(doc: &LetterDocument) -> String {
    doc.creators().first().copied().unwrap_or("").to_string()
}

fn first_field(doc: &LetterDocument, field: &str) -> String {
    doc.first_value(field).unwrap_or("").to_string()
}
