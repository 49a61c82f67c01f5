//! Corpus loading and derived views.
//!
//! The corpus is the JSON export of the letter archive: a single array of
//! letter records. It is loaded once, fully into memory (a few thousand
//! letters), and never mutated. Gzipped exports (`.gz` suffix) are handled
//! transparently.

use crate::error::{BrevsokError, Result};
use crate::types::{fields, LetterDocument, LetterId};
use flate2::read::GzDecoder;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// The full letter corpus, in export order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    letters: Vec<LetterDocument>,
}

impl Corpus {
    /// Build a corpus from already-loaded records.
    pub fn new(letters: Vec<LetterDocument>) -> Self {
        Corpus { letters }
    }

    /// Load a corpus from a JSON export, gzipped or plain.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BrevsokError::CorpusNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let letters: Vec<LetterDocument> =
            if path.extension().is_some_and(|ext| ext == "gz") {
                serde_json::from_reader(BufReader::new(GzDecoder::new(reader)))?
            } else {
                serde_json::from_reader(reader)?
            };

        info!(path = %path.display(), letters = letters.len(), "loaded corpus");
        Ok(Corpus { letters })
    }

    /// Number of letters in the corpus.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// True if the corpus holds no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Letters in export order.
    pub fn iter(&self) -> impl Iterator<Item = &LetterDocument> {
        self.letters.iter()
    }

    /// All letters as a slice.
    pub fn letters(&self) -> &[LetterDocument] {
        &self.letters
    }

    /// Look up a letter by id.
    pub fn get(&self, id: LetterId) -> Option<&LetterDocument> {
        self.letters.iter().find(|l| l.id == id)
    }

    /// Summary counts over the corpus.
    pub fn stats(&self) -> CorpusStats {
        let mut dated_values: Vec<&str> = self
            .letters
            .iter()
            .map(|l| l.letter_date())
            .filter(|d| !d.is_empty())
            .collect();
        dated_values.sort_unstable();

        CorpusStats {
            total_letters: self.letters.len(),
            dated: dated_values.len(),
            tagged: self.letters.iter().filter(|l| !l.tags.is_empty()).count(),
            earliest: dated_values.first().map(|d| d.to_string()),
            latest: dated_values.last().map(|d| d.to_string()),
        }
    }
}

/// Headline numbers for a loaded corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub total_letters: usize,
    pub dated: usize,
    pub tagged: usize,
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

/// Distinct facet values across the corpus, sorted, for listing and
/// completion. Creator entries exclude translator credits.
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    pub tags: Vec<String>,
    pub creators: Vec<String>,
    pub years: Vec<String>,
    pub locations: Vec<String>,
    pub destinations: Vec<String>,
}

impl MetadataIndex {
    /// Scan the corpus and collect the distinct value sets.
    pub fn build(corpus: &Corpus) -> Self {
        let mut tags = BTreeSet::new();
        let mut creators = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut locations = BTreeSet::new();
        let mut destinations = BTreeSet::new();

        for letter in corpus.iter() {
            for tag in &letter.tags {
                let tag = tag.trim();
                if !tag.is_empty() {
                    tags.insert(tag.to_string());
                }
            }
            for creator in letter.creators() {
                creators.insert(creator.to_string());
            }
            if let Some(year) = letter.year() {
                years.insert(year);
            }
            if let Some(location) = letter.first_value(fields::LOCATION) {
                locations.insert(location.to_string());
            }
            if let Some(destination) = letter.first_value(fields::DESTINATION) {
                destinations.insert(destination.to_string());
            }
        }

        MetadataIndex {
            tags: tags.into_iter().collect(),
            creators: creators.into_iter().collect(),
            years: years.into_iter().collect(),
            locations: locations.into_iter().collect(),
            destinations: destinations.into_iter().collect(),
        }
    }
}
