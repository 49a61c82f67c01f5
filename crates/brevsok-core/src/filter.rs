//! The canonical filter state driving search results.
//!
//! `FilterState` is a plain value object: it is mutated by the query parser
//! and by explicit UI-style toggles, read by the evaluator, and mapped to and
//! from a URL query string by the codec. It has no identity beyond the
//! current browsing session and performs no I/O of its own.
//!
//! Invariant: a value never lives in both the positive and the negative set
//! of the same facet. Every insertion goes through [`FilterState::insert`],
//! which removes the value from the opposite polarity.

use crate::facet::{Facet, Polarity};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Inclusive date bounds on the letter date.
///
/// A document with no parseable date is never excluded by a date bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Exclude letters dated after this
    pub before: Option<NaiveDate>,

    /// Exclude letters dated before this
    pub after: Option<NaiveDate>,
}

impl DateRange {
    /// True if neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}

/// The set of currently active filters.
///
/// Multi-selection facets (tags, years) may hold several values; creators,
/// locations and destinations are kept single-valued by the UI but the
/// evaluator supports multiple values for all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Plain free-text search (AND of words and quoted phrases)
    pub free_text: String,

    /// Space-separated free-text exclusion terms
    pub free_text_negative: String,

    /// Search scoped to the Title field
    pub title_search: String,

    /// Search scoped to the Text field
    pub text_search: String,

    pub creators: BTreeSet<String>,
    pub years: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub destinations: BTreeSet<String>,

    pub creators_negative: BTreeSet<String>,
    pub years_negative: BTreeSet<String>,
    pub tags_negative: BTreeSet<String>,
    pub locations_negative: BTreeSet<String>,
    pub destinations_negative: BTreeSet<String>,

    /// Date bounds on the letter date
    pub date_range: DateRange,

    /// Restrict results to an explicit id allow-list
    pub letter_ids: BTreeSet<String>,

    /// Bidirectional location <-> destination route filter: empty, or
    /// exactly two place names
    pub correspondence_pair: Vec<String>,
}

impl FilterState {
    /// Create an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value set for a facet and polarity.
    pub fn facet_values(&self, facet: Facet, polarity: Polarity) -> &BTreeSet<String> {
        match (facet, polarity) {
            (Facet::Creator, Polarity::Positive) => &self.creators,
            (Facet::Year, Polarity::Positive) => &self.years,
            (Facet::Tag, Polarity::Positive) => &self.tags,
            (Facet::Location, Polarity::Positive) => &self.locations,
            (Facet::Destination, Polarity::Positive) => &self.destinations,
            (Facet::Creator, Polarity::Negative) => &self.creators_negative,
            (Facet::Year, Polarity::Negative) => &self.years_negative,
            (Facet::Tag, Polarity::Negative) => &self.tags_negative,
            (Facet::Location, Polarity::Negative) => &self.locations_negative,
            (Facet::Destination, Polarity::Negative) => &self.destinations_negative,
        }
    }

    /// Mutable access to the value set for a facet and polarity.
    pub fn facet_values_mut(&mut self, facet: Facet, polarity: Polarity) -> &mut BTreeSet<String> {
        match (facet, polarity) {
            (Facet::Creator, Polarity::Positive) => &mut self.creators,
            (Facet::Year, Polarity::Positive) => &mut self.years,
            (Facet::Tag, Polarity::Positive) => &mut self.tags,
            (Facet::Location, Polarity::Positive) => &mut self.locations,
            (Facet::Destination, Polarity::Positive) => &mut self.destinations,
            (Facet::Creator, Polarity::Negative) => &mut self.creators_negative,
            (Facet::Year, Polarity::Negative) => &mut self.years_negative,
            (Facet::Tag, Polarity::Negative) => &mut self.tags_negative,
            (Facet::Location, Polarity::Negative) => &mut self.locations_negative,
            (Facet::Destination, Polarity::Negative) => &mut self.destinations_negative,
        }
    }

    /// Insert a facet value, removing it from the opposite polarity so a
    /// value never selects and excludes at the same time.
    pub fn insert(&mut self, facet: Facet, polarity: Polarity, value: impl Into<String>) {
        let value = value.into();
        self.facet_values_mut(facet, polarity.opposite())
            .remove(&value);
        self.facet_values_mut(facet, polarity).insert(value);
    }

    /// Symmetric add/remove for multi-selection facets.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        if self.facet_values(facet, Polarity::Positive).contains(value) {
            self.facet_values_mut(facet, Polarity::Positive).remove(value);
        } else {
            self.insert(facet, Polarity::Positive, value);
        }
    }

    /// Single-selection click behavior: replace the facet's value with this
    /// one, or deselect if it was already the sole selection.
    pub fn set_single(&mut self, facet: Facet, value: &str) {
        let set = self.facet_values(facet, Polarity::Positive);
        let deselect = set.len() == 1 && set.contains(value);
        self.facet_values_mut(facet, Polarity::Positive).clear();
        if !deselect {
            self.insert(facet, Polarity::Positive, value);
        }
    }

    /// Reset every field to its empty default.
    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    /// True iff no criterion of any kind is active.
    pub fn is_empty(&self) -> bool {
        *self == FilterState::default()
    }
}
