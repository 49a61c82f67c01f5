//! Core data types for Brevsok.
//!
//! This module defines the letter record as produced by the static export
//! pipeline: a numeric id, a metadata map from field name to an ordered list
//! of values, a tag list, and optional attached files. Records are immutable
//! after load.
//!
//! Several helpers encode corpus conventions that the rest of the crate
//! relies on:
//!
//! - A letter's *year* is the four-character prefix of its `LetterDate`
//!   value, which the export stores zero-padded (`1904-03-01`), so years and
//!   dates compare correctly as strings.
//! - Translator-credit entries in the `Creator` field (an archive-wide
//!   crediting convention) are filtered out wherever creators are read.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Names of the metadata fields the search core reads.
///
/// A record may carry additional fields; they are preserved but ignored.
pub mod fields {
    pub const TITLE: &str = "Title";
    pub const TEXT: &str = "Text";
    pub const DESCRIPTION: &str = "Description";
    pub const LETTER_DATE: &str = "LetterDate";
    pub const CREATOR: &str = "Creator";
    pub const LOCATION: &str = "Location";
    pub const DESTINATION: &str = "Destination";
}

/// Translator credits are stored as extra `Creator` entries following the
/// archive's "<name> ... trans" convention. They are credits, not authors,
/// and are excluded wherever creators are matched, sorted or listed.
pub const TRANSLATOR_CREDIT_PATTERN: &str = r"(?i)Siri Lawson.*trans";

fn translator_credit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(TRANSLATOR_CREDIT_PATTERN).expect("translator credit pattern is valid")
    })
}

/// Check whether a `Creator` entry is a translator credit.
pub fn is_translator_credit(value: &str) -> bool {
    translator_credit_re().is_match(value)
}

/// Unique identifier for a letter within the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterId(pub u64);

impl LetterId {
    /// Create a new letter ID
    pub fn new(id: u64) -> Self {
        LetterId(id)
    }

    /// Get the raw ID value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LetterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file attached to a letter (typically the scanned original).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterFile {
    /// Name the file was uploaded under
    pub original_name: Option<String>,

    /// Name the file is stored under in the archive
    pub stored_name: Option<String>,

    /// MIME type reported at ingestion
    pub mime_type: Option<String>,
}

/// A single digitized letter.
///
/// `metadata` maps a field name to an ordered sequence of values; a field may
/// be absent or hold several values (multiple creators, for example). `tags`
/// preserve insertion order for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterDocument {
    /// Unique identifier within the corpus
    pub id: LetterId,

    /// Field name to ordered values
    #[serde(default)]
    pub metadata: BTreeMap<String, Vec<String>>,

    /// Tags in insertion order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Attached files (scanned originals)
    #[serde(default)]
    pub files: Vec<LetterFile>,
}

impl LetterDocument {
    /// Create a record with empty metadata.
    pub fn new(id: LetterId) -> Self {
        LetterDocument {
            id,
            metadata: BTreeMap::new(),
            tags: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Set a metadata field, replacing any existing values.
    pub fn with_field(mut self, field: &str, values: Vec<String>) -> Self {
        self.metadata.insert(field.to_string(), values);
        self
    }

    /// Set the tag list.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// All values of a metadata field, or an empty slice if absent.
    pub fn field_values(&self, field: &str) -> &[String] {
        self.metadata.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First value of a metadata field, trimmed. `None` if absent or blank.
    pub fn first_value(&self, field: &str) -> Option<&str> {
        self.field_values(field)
            .first()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Raw `LetterDate` value, trimmed ("" if absent).
    pub fn letter_date(&self) -> &str {
        self.first_value(fields::LETTER_DATE).unwrap_or("")
    }

    /// Four-character year prefix of the letter date, if there is one.
    pub fn year(&self) -> Option<String> {
        let date = self.letter_date();
        if date.is_empty() {
            None
        } else {
            Some(date.chars().take(4).collect())
        }
    }

    /// Letter date as a calendar date, if parseable.
    ///
    /// Partial dates ("1900" or "1900-03") resolve to the first day of the
    /// period; anything unparseable yields `None` and is treated as unknown
    /// by date filters, never excluded.
    pub fn parse_date(&self) -> Option<NaiveDate> {
        parse_letter_date(self.letter_date())
    }

    /// Creator entries, trimmed, with translator credits removed.
    pub fn creators(&self) -> Vec<&str> {
        self.field_values(fields::CREATOR)
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty() && !is_translator_credit(c))
            .collect()
    }

    /// The text blob free-text search runs against: first Title, Description
    /// and Text values joined with spaces.
    pub fn searchable_text(&self) -> String {
        [fields::TITLE, fields::DESCRIPTION, fields::TEXT]
            .iter()
            .map(|f| {
                self.field_values(f)
                    .first()
                    .map(String::as_str)
                    .unwrap_or("")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Character length of the first Text value (the `length` sort key).
    pub fn text_len(&self) -> usize {
        self.field_values(fields::TEXT)
            .first()
            .map(|t| t.chars().count())
            .unwrap_or(0)
    }
}

impl PartialEq for LetterDocument {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LetterDocument {}

/// Parse a letter date string leniently.
pub fn parse_letter_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    // Partial dates resolve to the first day of the period
    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = match parts.next() {
        Some(m) => m.trim().parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(date: &str) -> LetterDocument {
        LetterDocument::new(LetterId::new(1))
            .with_field(fields::LETTER_DATE, vec![date.to_string()])
    }

    #[test]
    fn test_year_prefix() {
        assert_eq!(letter("1904-03-01").year(), Some("1904".to_string()));
        assert_eq!(letter("  1904-03-01  ").year(), Some("1904".to_string()));
        assert_eq!(letter("").year(), None);
        assert_eq!(LetterDocument::new(LetterId::new(2)).year(), None);
    }

    #[test]
    fn test_parse_letter_date() {
        assert_eq!(
            parse_letter_date("1904-03-01"),
            NaiveDate::from_ymd_opt(1904, 3, 1)
        );
        assert_eq!(parse_letter_date("1904"), NaiveDate::from_ymd_opt(1904, 1, 1));
        assert_eq!(
            parse_letter_date("1904-06"),
            NaiveDate::from_ymd_opt(1904, 6, 1)
        );
        assert_eq!(parse_letter_date("circa 1900"), None);
        assert_eq!(parse_letter_date(""), None);
    }

    #[test]
    fn test_creators_filter_translator_credit() {
        let doc = LetterDocument::new(LetterId::new(3)).with_field(
            fields::CREATOR,
            vec![
                "Ola Olsen".to_string(),
                "Siri Lawson (trans.)".to_string(),
                "  Kari Olsen  ".to_string(),
            ],
        );
        assert_eq!(doc.creators(), vec!["Ola Olsen", "Kari Olsen"]);
    }

    #[test]
    fn test_translator_suffix_order_matters() {
        // "trans." before the name does not match the credit pattern, so the
        // entry stays visible and matchable.
        let doc = LetterDocument::new(LetterId::new(4)).with_field(
            fields::CREATOR,
            vec!["Ola Olsen (trans. Siri Lawson)".to_string()],
        );
        assert_eq!(doc.creators(), vec!["Ola Olsen (trans. Siri Lawson)"]);
        assert!(is_translator_credit("Siri Lawson, trans."));
        assert!(!is_translator_credit("Ola Olsen"));
    }

    #[test]
    fn test_searchable_text() {
        let doc = LetterDocument::new(LetterId::new(5))
            .with_field(fields::TITLE, vec!["A storm at sea".to_string()])
            .with_field(fields::TEXT, vec!["Dear brother".to_string()]);
        assert_eq!(doc.searchable_text(), "A storm at sea  Dear brother");
    }

    #[test]
    fn test_text_len_counts_chars() {
        let doc = LetterDocument::new(LetterId::new(6))
            .with_field(fields::TEXT, vec!["blåbærsyltetøy".to_string()]);
        assert_eq!(doc.text_len(), 14);
    }

    #[test]
    fn test_letter_file_wire_names() {
        let json = r#"{"originalName":"letter.pdf","storedName":"abc123.pdf","mimeType":"application/pdf"}"#;
        let file: LetterFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.original_name.as_deref(), Some("letter.pdf"));
        assert_eq!(file.mime_type.as_deref(), Some("application/pdf"));
    }
}
