//! Free-text query tokenizer shared by the parser and the evaluator.
//!
//! A free-text query is an implicit AND of quoted phrases and bare words:
//! `"ship letter" storm` matches a text blob that contains the phrase
//! "ship letter" verbatim (case-insensitive) and the word "storm" anywhere.
//! There is no OR and no negation at this level; negation is handled one
//! level up by the query parser and the evaluator.

/// A parsed free-text query: quoted phrases plus bare words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery {
    /// Quoted phrases, matched verbatim as substrings
    pub phrases: Vec<String>,

    /// Bare words, each matched independently as a substring
    pub words: Vec<String>,
}

impl TextQuery {
    /// Extract `"..."` and `'...'` phrases, then split the remainder on
    /// whitespace. Empty phrases and empty tokens are discarded. An
    /// unterminated quote degrades to bare words.
    pub fn parse(raw: &str) -> Self {
        let mut phrases = Vec::new();
        let mut rest = String::new();

        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c == '"' || c == '\'' {
                let mut phrase = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == c {
                        closed = true;
                        break;
                    }
                    phrase.push(n);
                }
                if closed {
                    let phrase = phrase.trim();
                    if !phrase.is_empty() {
                        phrases.push(phrase.to_string());
                    }
                    rest.push(' ');
                } else {
                    rest.push(' ');
                    rest.push_str(&phrase);
                }
            } else {
                rest.push(c);
            }
        }

        let words = rest.split_whitespace().map(str::to_string).collect();
        TextQuery { phrases, words }
    }

    /// True if the query has no phrases and no words.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty() && self.words.is_empty()
    }

    /// Check a text blob against this query: every phrase and every word
    /// must be present as a case-insensitive substring.
    pub fn matches(&self, text: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        let haystack = text.to_lowercase();
        self.phrases
            .iter()
            .all(|p| haystack.contains(&p.to_lowercase()))
            && self
                .words
                .iter()
                .all(|w| haystack.contains(&w.to_lowercase()))
    }
}

/// Convenience: parse and match in one step. An empty query matches
/// everything.
pub fn matches_query(text: &str, query: &str) -> bool {
    TextQuery::parse(query).matches(text)
}
