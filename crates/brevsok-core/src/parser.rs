//! Query mini-language parser.
//!
//! Turns one raw search-box string into a set of mutations on
//! [`FilterState`], leaving the unprefixed remainder as the plain free-text
//! query. The grammar (all tokens case-insensitive, whitespace-delimited):
//!
//! - `prefix:value` or `prefix:"multi word value"`: facet filter, with
//!   `prefix` one of `from|f|creator|c`, `year|y`, `tag|t`, `location|l`,
//!   `destination|d`, `title|n`, `text`
//! - `!prefix:value`: negated facet filter
//! - `!word`: ad hoc free-text exclusion
//! - anything else: free text (quotes group phrases)
//!
//! The implementation is a quote-aware whitespace tokenizer plus a
//! table-driven prefix dispatch over [`FACETS`]; no regexes and no index
//! bookkeeping. Malformed tokens (empty value, non-numeric year,
//! unterminated quote) are left in the residual free text rather than
//! failing the parse, so re-parsing a residual never extracts anything new.

use crate::facet::{Facet, Polarity};
use crate::filter::FilterState;
use std::collections::HashSet;
use tracing::trace;

/// Parse an input string into a fresh filter state.
pub fn parse(input: &str) -> FilterState {
    let mut state = FilterState::new();
    parse_into(input, &mut state);
    state
}

/// Parse an input string, mutating `state`.
///
/// An empty input clears only the text fields (`free_text`,
/// `free_text_negative`, `title_search`, `text_search`); facet sets are
/// mutated exclusively by explicit prefixed tokens or UI toggles.
pub fn parse_into(input: &str, state: &mut FilterState) {
    let input = input.trim();
    if input.is_empty() {
        state.free_text.clear();
        state.free_text_negative.clear();
        state.title_search.clear();
        state.text_search.clear();
        return;
    }

    // Repopulated below from any !word tokens present
    state.free_text_negative.clear();

    let tokens: Vec<Token> = split_tokens(input).iter().map(classify).collect();
    trace!(?tokens, "classified query tokens");

    // Single-selection facets replace rather than accumulate: the first
    // token for a facet+polarity in this parse clears the previous
    // selection, later tokens in the same parse add to it.
    let mut cleared: HashSet<(Facet, Polarity)> = HashSet::new();
    for token in &tokens {
        if let Token::Facet {
            facet, polarity, ..
        } = token
        {
            if !facet.spec().multi_valued && cleared.insert((*facet, *polarity)) {
                state.facet_values_mut(*facet, *polarity).clear();
            }
        }
    }

    // Negative facet tokens are applied before positive ones, matching the
    // documented processing order; with whole-token classification the two
    // passes can never claim the same input span.
    for token in &tokens {
        if let Token::Facet {
            facet,
            polarity: Polarity::Negative,
            value,
        } = token
        {
            state.insert(*facet, Polarity::Negative, value.clone());
        }
    }

    for token in &tokens {
        match token {
            Token::Facet {
                facet,
                polarity: Polarity::Positive,
                value,
            } => state.insert(*facet, Polarity::Positive, value.clone()),
            // Single-valued fields: the most recent occurrence wins
            Token::TitleSearch { value } => state.title_search = value.clone(),
            Token::TextSearch { value } => state.text_search = value.clone(),
            _ => {}
        }
    }

    let negative_terms: Vec<&str> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::BareNegative { term } => Some(term.as_str()),
            _ => None,
        })
        .collect();
    state.free_text_negative = negative_terms.join(" ");

    let residual: Vec<&str> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::FreeText { raw } => Some(raw.as_str()),
            _ => None,
        })
        .collect();
    state.free_text = residual.join(" ");
}

/// A classified query token.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// `[!]prefix:value` for one of the five facets
    Facet {
        facet: Facet,
        polarity: Polarity,
        value: String,
    },
    /// `title:`/`n:` scoped search (single-valued)
    TitleSearch { value: String },
    /// `text:` scoped search (single-valued)
    TextSearch { value: String },
    /// `!word` free-text exclusion
    BareNegative { term: String },
    /// Residual free text, kept verbatim (including any quotes)
    FreeText { raw: String },
}

/// A whitespace-delimited token with double quotes grouping.
#[derive(Debug)]
struct RawToken {
    raw: String,
    unterminated: bool,
}

/// Split on top-level whitespace; a `"` opens a quoted region in which
/// whitespace does not split. Quote characters are kept in the raw text so
/// malformed tokens survive verbatim into the residual free text.
fn split_tokens(input: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;

    for c in input.chars() {
        if in_quote {
            current.push(c);
            if c == '"' {
                in_quote = false;
            }
        } else if c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(RawToken {
                    raw: std::mem::take(&mut current),
                    unterminated: false,
                });
            }
        } else {
            if c == '"' {
                in_quote = true;
            }
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push(RawToken {
            raw: current,
            unterminated: in_quote,
        });
    }
    tokens
}

fn classify(token: &RawToken) -> Token {
    let free_text = || Token::FreeText {
        raw: token.raw.clone(),
    };

    if token.unterminated {
        return free_text();
    }

    let (negated, body) = match token.raw.strip_prefix('!') {
        Some(rest) if !rest.is_empty() => (true, rest),
        _ => (false, token.raw.as_str()),
    };

    if let Some((prefix, value_part)) = body.split_once(':') {
        let value = unquote(value_part);

        if let Some(facet) = Facet::from_prefix(prefix) {
            if value.is_empty() {
                return free_text();
            }
            // Year values must be exactly four digits; anything else stays
            // in the free text.
            if facet == Facet::Year && !is_year(&value) {
                return free_text();
            }
            let polarity = if negated {
                Polarity::Negative
            } else {
                Polarity::Positive
            };
            return Token::Facet {
                facet,
                polarity,
                value,
            };
        }

        if prefix.eq_ignore_ascii_case("title") || prefix.eq_ignore_ascii_case("n") {
            if negated || value.is_empty() {
                // Title/text have no negative form; a negated token joins
                // the free-text exclusions instead.
                return negated_or_free_text(negated, body, free_text);
            }
            return Token::TitleSearch { value };
        }
        if prefix.eq_ignore_ascii_case("text") {
            if negated || value.is_empty() {
                return negated_or_free_text(negated, body, free_text);
            }
            return Token::TextSearch { value };
        }

        // Unknown prefix: `!foo:bar` excludes the literal text, `foo:bar`
        // is ordinary free text.
        return negated_or_free_text(negated, body, free_text);
    }

    if negated {
        let term = unquote(body);
        if !term.is_empty() {
            return Token::BareNegative { term };
        }
    }
    free_text()
}

fn negated_or_free_text(negated: bool, body: &str, free_text: impl Fn() -> Token) -> Token {
    // A negated prefix with no value (`!title:`) is malformed, not an
    // exclusion term.
    if negated && !body.ends_with(':') {
        Token::BareNegative {
            term: body.to_string(),
        }
    } else {
        free_text()
    }
}

/// Strip one pair of surrounding double quotes, then trim.
fn unquote(value: &str) -> String {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    inner.trim().to_string()
}

fn is_year(value: &str) -> bool {
    value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_creator_and_year() {
        let state = parse("f:Olsen year:1900");
        assert_eq!(state.creators, set(&["Olsen"]));
        assert_eq!(state.years, set(&["1900"]));
        assert_eq!(state.free_text, "");
    }

    #[test]
    fn test_negative_year_with_free_text() {
        let state = parse("!y:1900 storm");
        assert_eq!(state.years_negative, set(&["1900"]));
        assert!(state.years.is_empty());
        assert_eq!(state.free_text, "storm");
    }

    #[test]
    fn test_tags_accumulate_with_quoting() {
        let mut state = parse(r#"tag:"ship letter""#);
        parse_into("tag:family", &mut state);
        assert_eq!(state.tags, set(&["ship letter", "family"]));
    }

    #[test]
    fn test_prefix_aliases_case_insensitive() {
        let state = parse("CREATOR:Olsen Y:1900 T:family L:Oslo D:Chicago");
        assert_eq!(state.creators, set(&["Olsen"]));
        assert_eq!(state.years, set(&["1900"]));
        assert_eq!(state.tags, set(&["family"]));
        assert_eq!(state.locations, set(&["Oslo"]));
        assert_eq!(state.destinations, set(&["Chicago"]));
    }

    #[test]
    fn test_single_selection_replaced_across_parses() {
        let mut state = parse("from:Olsen");
        parse_into("from:Hansen", &mut state);
        assert_eq!(state.creators, set(&["Hansen"]));
    }

    #[test]
    fn test_single_selection_accumulates_within_one_parse() {
        let state = parse("f:Olsen f:Hansen");
        assert_eq!(state.creators, set(&["Olsen", "Hansen"]));
    }

    #[test]
    fn test_multi_selection_survives_across_parses() {
        let mut state = parse("y:1900 t:family");
        parse_into("y:1901", &mut state);
        assert_eq!(state.years, set(&["1900", "1901"]));
        assert_eq!(state.tags, set(&["family"]));
    }

    #[test]
    fn test_title_and_text_most_recent_wins() {
        let state = parse(r#"title:first n:"second title" text:body"#);
        assert_eq!(state.title_search, "second title");
        assert_eq!(state.text_search, "body");
    }

    #[test]
    fn test_bare_negation() {
        let state = parse("!Axel !winter storm");
        assert_eq!(state.free_text_negative, "Axel winter");
        assert_eq!(state.free_text, "storm");
    }

    #[test]
    fn test_unknown_prefix_is_free_text() {
        let state = parse("ext:rs hello");
        assert_eq!(state.free_text, "ext:rs hello");
    }

    #[test]
    fn test_negated_unknown_prefix_excludes_literal() {
        let state = parse("!foo:bar");
        assert_eq!(state.free_text_negative, "foo:bar");
        assert_eq!(state.free_text, "");
    }

    #[test]
    fn test_malformed_tokens_stay_in_free_text() {
        // Empty value, bad year, unterminated quote
        let state = parse(r#"tag: y:190 f:"Ola Olsen"#);
        assert!(state.tags.is_empty());
        assert!(state.years.is_empty());
        assert!(state.creators.is_empty());
        assert_eq!(state.free_text, r#"tag: y:190 f:"Ola Olsen"#);
    }

    #[test]
    fn test_free_text_keeps_quoted_phrases() {
        let state = parse(r#""dear brother" storm"#);
        assert_eq!(state.free_text, r#""dear brother" storm"#);
    }

    #[test]
    fn test_idempotence_of_residual() {
        let mut state = parse(r#"f:Olsen tag: "dear brother" storm"#);
        let residual = state.free_text.clone();
        let creators = state.creators.clone();

        parse_into(&residual, &mut state);
        assert_eq!(state.free_text, residual);
        assert_eq!(state.creators, creators);
        assert!(state.tags.is_empty());
    }

    #[test]
    fn test_empty_input_clears_only_text_fields() {
        let mut state = parse("f:Olsen y:1900 storm !winter n:title text:body");
        parse_into("", &mut state);
        assert_eq!(state.free_text, "");
        assert_eq!(state.free_text_negative, "");
        assert_eq!(state.title_search, "");
        assert_eq!(state.text_search, "");
        assert_eq!(state.creators, set(&["Olsen"]));
        assert_eq!(state.years, set(&["1900"]));
    }

    #[test]
    fn test_polarity_flip_keeps_one_side() {
        let mut state = parse("t:family");
        parse_into("!t:family", &mut state);
        assert!(state.tags.is_empty());
        assert_eq!(state.tags_negative, set(&["family"]));
    }

    #[test]
    fn test_quoted_facet_value() {
        let state = parse(r#"!l:"New York" d:Bergen"#);
        assert_eq!(state.locations_negative, set(&["New York"]));
        assert_eq!(state.destinations, set(&["Bergen"]));
    }

    #[test]
    fn test_lone_bang_is_free_text() {
        let state = parse("! storm");
        assert_eq!(state.free_text, "! storm");
        assert_eq!(state.free_text_negative, "");
    }

    #[test]
    fn test_quoted_bare_negation() {
        let state = parse(r#"!"ship letter""#);
        assert_eq!(state.free_text_negative, "ship letter");
    }
}
