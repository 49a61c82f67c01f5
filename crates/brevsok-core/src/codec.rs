//! Filter state to URL query string and back.
//!
//! The codec is the deep-linking surface: every reachable filter state
//! serializes to a flat key/value query string, and decoding any encoded
//! string reconstructs a state that evaluates identically. Decoding is
//! deliberately tolerant: unknown keys and malformed values are ignored,
//! never fatal, so partial or foreign query strings simply yield a partial
//! state.
//!
//! Key surface: `search`, `searchNegative`, `titleSearch`, `textSearch`,
//! repeated `years`/`creators`/`tags`/`locations`/`destinations` (and their
//! `...Negative` counterparts), `ids` (semicolon-joined), repeated `pair`,
//! `before`, `after`, `sort` (omitted when the default) and `letter` (the
//! currently displayed id, not a filter).

use crate::facet::{Polarity, FACETS};
use crate::filter::FilterState;
use crate::sort::SortKey;
use crate::types::parse_letter_date;

/// Ids are joined under one `ids` key with a delimiter that cannot occur in
/// a numeric id.
const ID_DELIMITER: char = ';';

/// Everything the URL carries: the filter state plus view concerns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    /// Active filters
    pub filters: FilterState,

    /// Result ordering (`date-asc` when absent)
    pub sort: SortKey,

    /// Currently displayed letter id, if any. Not a filter.
    pub letter: Option<String>,
}

impl UrlState {
    /// Wrap a filter state with default view settings.
    pub fn new(filters: FilterState) -> Self {
        UrlState {
            filters,
            sort: SortKey::default(),
            letter: None,
        }
    }

    /// Serialize to a query string (no leading `?`). Empty and default
    /// fields are omitted; an empty state encodes to an empty string.
    pub fn encode(&self) -> String {
        let f = &self.filters;
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if !f.free_text.is_empty() {
            pairs.push(("search", f.free_text.clone()));
        }
        if !f.title_search.is_empty() {
            pairs.push(("titleSearch", f.title_search.clone()));
        }
        if !f.text_search.is_empty() {
            pairs.push(("textSearch", f.text_search.clone()));
        }
        for spec in FACETS {
            for value in f.facet_values(spec.facet, Polarity::Positive) {
                pairs.push((spec.query_key, value.clone()));
            }
        }
        if !f.free_text_negative.is_empty() {
            pairs.push(("searchNegative", f.free_text_negative.clone()));
        }
        for spec in FACETS {
            for value in f.facet_values(spec.facet, Polarity::Negative) {
                pairs.push((spec.negative_query_key, value.clone()));
            }
        }
        if !f.letter_ids.is_empty() {
            let ids: Vec<&str> = f.letter_ids.iter().map(String::as_str).collect();
            pairs.push(("ids", ids.join(&ID_DELIMITER.to_string())));
        }
        // Pair order is user-visible ("Oslo and Chicago"), keep it
        for place in &f.correspondence_pair {
            pairs.push(("pair", place.clone()));
        }
        if let Some(before) = f.date_range.before {
            pairs.push(("before", before.format("%Y-%m-%d").to_string()));
        }
        if let Some(after) = f.date_range.after {
            pairs.push(("after", after.format("%Y-%m-%d").to_string()));
        }
        if self.sort != SortKey::default() {
            pairs.push(("sort", self.sort.as_str().to_string()));
        }
        if let Some(letter) = &self.letter {
            pairs.push(("letter", letter.clone()));
        }

        pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Reconstruct a state from a query string. A leading `?` is accepted;
    /// unknown keys, empty values and malformed dates are skipped.
    pub fn decode(query: &str) -> Self {
        let mut decoded = UrlState::default();
        let filters = &mut decoded.filters;
        let mut pair = Vec::new();

        let query = query.strip_prefix('?').unwrap_or(query);
        for part in query.split('&') {
            if part.is_empty() {
                continue;
            }
            let (key, raw_value) = part.split_once('=').unwrap_or((part, ""));
            // '+' as space for tolerance toward form-encoded producers
            let value = match urlencoding::decode(&raw_value.replace('+', " ")) {
                Ok(value) => value.into_owned(),
                Err(_) => continue,
            };
            if value.is_empty() {
                continue;
            }

            match key {
                "search" => filters.free_text = value,
                "searchNegative" => filters.free_text_negative = value,
                "titleSearch" => filters.title_search = value,
                "textSearch" => filters.text_search = value,
                "ids" => {
                    for id in value.split(ID_DELIMITER) {
                        let id = id.trim();
                        if !id.is_empty() {
                            filters.letter_ids.insert(id.to_string());
                        }
                    }
                }
                "pair" => pair.push(value),
                "before" => filters.date_range.before = parse_letter_date(&value),
                "after" => filters.date_range.after = parse_letter_date(&value),
                "sort" => {
                    if let Ok(sort) = value.parse() {
                        decoded.sort = sort;
                    }
                }
                "letter" => decoded.letter = Some(value),
                other => {
                    if let Some(spec) = FACETS.iter().find(|s| s.query_key == other) {
                        filters.insert(spec.facet, Polarity::Positive, value);
                    } else if let Some(spec) =
                        FACETS.iter().find(|s| s.negative_query_key == other)
                    {
                        filters.insert(spec.facet, Polarity::Negative, value);
                    }
                    // Unknown keys are ignored
                }
            }
        }

        // A correspondence pair is exactly two places; anything else is
        // malformed and dropped.
        if pair.len() == 2 {
            decoded.filters.correspondence_pair = pair;
        }

        decoded
    }
}
