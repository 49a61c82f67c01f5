//! Filter evaluation over the corpus.
//!
//! A document is included only if it passes every active predicate kind
//! (logical AND across kinds). Evaluation short-circuits on the first
//! failing predicate but is order-independent in outcome: any evaluation
//! order yields the same pass/fail result for a given document.
//!
//! Facet predicates drive off the shared [`FACETS`] table; the per-facet
//! combination rule (OR for most, AND for tags) and the per-value comparison
//! (substring for most, exact year membership) come from the table, not from
//! per-facet branches. Exclusion is always OR: one matching negative value
//! excludes the document, tags included.

use crate::corpus::Corpus;
use crate::facet::{Facet, FacetSpec, MatchMode, Polarity, ValueMatch, FACETS};
use crate::filter::FilterState;
use crate::text::matches_query;
use crate::types::{fields, LetterDocument};
use tracing::debug;

/// Scan the corpus and collect the documents matching the filter state, in
/// corpus order. Ordering beyond that is the sort engine's job.
pub fn evaluate<'a>(corpus: &'a Corpus, state: &FilterState) -> Vec<&'a LetterDocument> {
    let results: Vec<&LetterDocument> = corpus.iter().filter(|doc| matches(state, doc)).collect();
    debug!(
        total = corpus.len(),
        matched = results.len(),
        "evaluated filter state"
    );
    results
}

/// Check one document against the filter state.
pub fn matches(state: &FilterState, doc: &LetterDocument) -> bool {
    if !state.letter_ids.is_empty() && !state.letter_ids.contains(&doc.id.to_string()) {
        return false;
    }

    // The correspondence pair is a bidirectional route restriction; when
    // active it stands in for the positive location/destination facets.
    let pair_active = state.correspondence_pair.len() == 2;
    if pair_active && !matches_pair(doc, &state.correspondence_pair) {
        return false;
    }

    if !state.free_text.is_empty() && !matches_query(&doc.searchable_text(), &state.free_text) {
        return false;
    }
    if !state.title_search.is_empty() {
        let title = doc.first_value(fields::TITLE).unwrap_or("");
        if !matches_query(title, &state.title_search) {
            return false;
        }
    }
    if !state.text_search.is_empty() {
        let text = doc.first_value(fields::TEXT).unwrap_or("");
        if !matches_query(text, &state.text_search) {
            return false;
        }
    }

    if !state.free_text_negative.is_empty() {
        let blob = doc.searchable_text().to_lowercase();
        let excluded = state
            .free_text_negative
            .split_whitespace()
            .any(|term| blob.contains(&term.to_lowercase()));
        if excluded {
            return false;
        }
    }

    for spec in FACETS {
        let skip_positive =
            pair_active && matches!(spec.facet, Facet::Location | Facet::Destination);

        let selected = state.facet_values(spec.facet, Polarity::Positive);
        if !selected.is_empty()
            && !skip_positive
            && !facet_matches(doc, spec, selected.iter(), spec.match_mode)
        {
            return false;
        }

        let excluded = state.facet_values(spec.facet, Polarity::Negative);
        if !excluded.is_empty() && facet_matches(doc, spec, excluded.iter(), MatchMode::Any) {
            return false;
        }
    }

    if !state.date_range.is_empty() {
        // A document without a parseable date is never excluded by a bound
        if let Some(date) = doc.parse_date() {
            if let Some(before) = state.date_range.before {
                if date > before {
                    return false;
                }
            }
            if let Some(after) = state.date_range.after {
                if date < after {
                    return false;
                }
            }
        }
    }

    true
}

fn matches_pair(doc: &LetterDocument, pair: &[String]) -> bool {
    let a = pair[0].to_lowercase();
    let b = pair[1].to_lowercase();
    let location = doc
        .first_value(fields::LOCATION)
        .unwrap_or("")
        .to_lowercase();
    let destination = doc
        .first_value(fields::DESTINATION)
        .unwrap_or("")
        .to_lowercase();

    (location.contains(&a) && destination.contains(&b))
        || (location.contains(&b) && destination.contains(&a))
}

fn facet_matches<'a>(
    doc: &LetterDocument,
    spec: &FacetSpec,
    mut selected: impl Iterator<Item = &'a String>,
    mode: MatchMode,
) -> bool {
    let values = facet_values_lower(doc, spec.facet);
    let hit = |sel: &&String| {
        let sel = sel.to_lowercase();
        match spec.value_match {
            ValueMatch::ExactYear => values.iter().any(|v| *v == sel),
            ValueMatch::Substring => values.iter().any(|v| v.contains(&sel)),
        }
    };
    match mode {
        MatchMode::Any => selected.any(|s| hit(&s)),
        MatchMode::All => selected.all(|s| hit(&s)),
    }
}

/// The document values a facet is matched against, lowercased.
fn facet_values_lower(doc: &LetterDocument, facet: Facet) -> Vec<String> {
    match facet {
        Facet::Creator => doc.creators().iter().map(|c| c.to_lowercase()).collect(),
        Facet::Tag => doc
            .tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect(),
        Facet::Year => doc.year().into_iter().collect(),
        Facet::Location => doc
            .first_value(fields::LOCATION)
            .map(|v| vec![v.to_lowercase()])
            .unwrap_or_default(),
        Facet::Destination => doc
            .first_value(fields::DESTINATION)
            .map(|v| vec![v.to_lowercase()])
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;
    use crate::types::LetterId;
    use chrono::NaiveDate;

    fn doc(id: u64) -> LetterDocument {
        LetterDocument::new(LetterId::new(id))
    }

    fn oslo_letter() -> LetterDocument {
        doc(1)
            .with_field(fields::TITLE, vec!["A storm at sea".to_string()])
            .with_field(fields::TEXT, vec!["Dear brother, the winter...".to_string()])
            .with_field(fields::LETTER_DATE, vec!["1900-03-01".to_string()])
            .with_field(fields::CREATOR, vec!["Ola Olsen".to_string()])
            .with_field(fields::LOCATION, vec!["Oslo".to_string()])
            .with_field(fields::DESTINATION, vec!["Chicago, IL".to_string()])
            .with_tags(vec!["ship letter".to_string(), "family".to_string()])
    }

    #[test]
    fn test_empty_state_matches_everything() {
        assert!(matches(&FilterState::new(), &oslo_letter()));
        assert!(matches(&FilterState::new(), &doc(2)));
    }

    #[test]
    fn test_free_text_over_blob() {
        let state = parser::parse("storm winter");
        assert!(matches(&state, &oslo_letter()));
        let state = parser::parse("storm summer");
        assert!(!matches(&state, &oslo_letter()));
    }

    #[test]
    fn test_free_text_negative_any_term_excludes() {
        let mut state = FilterState::new();
        state.free_text_negative = "summer winter".to_string();
        assert!(!matches(&state, &oslo_letter()));

        state.free_text_negative = "summer autumn".to_string();
        assert!(matches(&state, &oslo_letter()));
    }

    #[test]
    fn test_title_and_text_scoped() {
        let state = parser::parse("n:storm");
        assert!(matches(&state, &oslo_letter()));
        // "brother" is in the text, not the title
        let state = parser::parse("n:brother");
        assert!(!matches(&state, &oslo_letter()));
        let state = parser::parse("text:brother");
        assert!(matches(&state, &oslo_letter()));
    }

    #[test]
    fn test_creator_substring_match() {
        let state = parser::parse("f:olsen");
        assert!(matches(&state, &oslo_letter()));
        let state = parser::parse("f:Hansen");
        assert!(!matches(&state, &oslo_letter()));
    }

    #[test]
    fn test_creator_with_inline_translator_note_still_matches() {
        // The credit pattern needs the translator name before "trans";
        // an inline note on the author entry is left matchable.
        let letter = doc(4).with_field(
            fields::CREATOR,
            vec!["Ola Olsen (trans. Siri Lawson)".to_string()],
        );
        let state = parser::parse("f:Olsen");
        assert!(matches(&state, &letter));
    }

    #[test]
    fn test_translator_credit_entry_not_matchable() {
        let letter = doc(5).with_field(
            fields::CREATOR,
            vec![
                "Ola Olsen".to_string(),
                "Siri Lawson, trans.".to_string(),
            ],
        );
        let state = parser::parse("f:Lawson");
        assert!(!matches(&state, &letter));
    }

    #[test]
    fn test_tags_and_across_selected() {
        let state = parser::parse("t:ship t:family");
        assert!(matches(&state, &oslo_letter()));

        let state = parser::parse("t:ship t:weather");
        assert!(!matches(&state, &oslo_letter()));
    }

    #[test]
    fn test_negative_tags_or_across_selected() {
        // Positive {ship, weather} requires both; negative {ship, weather}
        // excludes on either.
        let state = parser::parse("!t:ship !t:weather");
        assert!(!matches(&state, &oslo_letter()));
    }

    #[test]
    fn test_years_exact_not_substring() {
        let state = parser::parse("y:1900");
        assert!(matches(&state, &oslo_letter()));

        // Substring facets would match "190" against "1900"; years must not
        let mut state = FilterState::new();
        state.years.insert("190".to_string());
        assert!(!matches(&state, &oslo_letter()));
    }

    #[test]
    fn test_negative_year_excludes() {
        let state = parser::parse("!y:1900");
        assert!(!matches(&state, &oslo_letter()));
        let state = parser::parse("!y:1901");
        assert!(matches(&state, &oslo_letter()));
    }

    #[test]
    fn test_letter_id_allow_list() {
        let mut state = FilterState::new();
        state.letter_ids.insert("1".to_string());
        assert!(matches(&state, &oslo_letter()));
        assert!(!matches(&state, &doc(2)));
    }

    #[test]
    fn test_correspondence_pair_bidirectional() {
        let mut state = FilterState::new();
        state.correspondence_pair = vec!["Oslo".to_string(), "Chicago".to_string()];

        // Forward: Oslo -> Chicago, IL (substring containment)
        assert!(matches(&state, &oslo_letter()));

        // Reverse direction also matches
        let reverse = doc(2)
            .with_field(fields::LOCATION, vec!["Chicago".to_string()])
            .with_field(fields::DESTINATION, vec!["Oslo".to_string()]);
        assert!(matches(&state, &reverse));

        // Different route does not
        let other = doc(3)
            .with_field(fields::LOCATION, vec!["Oslo".to_string()])
            .with_field(fields::DESTINATION, vec!["Bergen".to_string()]);
        assert!(!matches(&state, &other));
    }

    #[test]
    fn test_pair_replaces_positive_location_facets() {
        let mut state = FilterState::new();
        state.correspondence_pair = vec!["Oslo".to_string(), "Chicago".to_string()];
        // A stale location selection must not constrain further while the
        // pair is active.
        state.locations.insert("Bergen".to_string());
        assert!(matches(&state, &oslo_letter()));

        // Negative location filters still exclude
        state.locations_negative.insert("Oslo".to_string());
        assert!(!matches(&state, &oslo_letter()));
    }

    #[test]
    fn test_date_range() {
        let mut state = FilterState::new();
        state.date_range.after = NaiveDate::from_ymd_opt(1899, 1, 1);
        state.date_range.before = NaiveDate::from_ymd_opt(1901, 1, 1);
        assert!(matches(&state, &oslo_letter()));

        state.date_range.before = NaiveDate::from_ymd_opt(1899, 12, 31);
        assert!(!matches(&state, &oslo_letter()));

        // Undated letters are never excluded by date bounds
        assert!(matches(&state, &doc(9)));
    }

    #[test]
    fn test_and_across_kinds() {
        // Every active kind must hold on its own.
        let state = parser::parse("f:Olsen y:1900 t:family storm");
        assert!(matches(&state, &oslo_letter()));

        let state = parser::parse("f:Olsen y:1901 t:family storm");
        assert!(!matches(&state, &oslo_letter()));
        let state = parser::parse("f:Hansen y:1900 t:family storm");
        assert!(!matches(&state, &oslo_letter()));
        let state = parser::parse("f:Olsen y:1900 t:weather storm");
        assert!(!matches(&state, &oslo_letter()));
        let state = parser::parse("f:Olsen y:1900 t:family summer");
        assert!(!matches(&state, &oslo_letter()));
    }

    #[test]
    fn test_evaluate_keeps_corpus_order() {
        let corpus = Corpus::new(vec![oslo_letter(), doc(2), oslo_letter_with_id(3)]);
        let state = parser::parse("f:Olsen");
        let ids: Vec<u64> = evaluate(&corpus, &state)
            .iter()
            .map(|d| d.id.as_u64())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    fn oslo_letter_with_id(id: u64) -> LetterDocument {
        let mut letter = oslo_letter();
        letter.id = LetterId::new(id);
        letter
    }
}
