//! # Brevsok Core Library
//!
//! This crate provides the search core for Brevsok, a faceted browser for a
//! corpus of digitized historical letters. It holds no UI: it parses the
//! search mini-language, evaluates filter states against the corpus, orders
//! results, and maps filter states to and from shareable URL query strings.
//!
//! ## Architecture
//!
//! - **Types** (`types`): The letter record and corpus field conventions
//! - **Corpus** (`corpus`): Loading the JSON export, stats and value index
//! - **Facets** (`facet`): The facet table driving parsing, matching, codec
//! - **Filter** (`filter`): The canonical filter state value object
//! - **Parser** (`parser`): Search box mini-language to filter state
//! - **Eval** (`eval`): Filter state against letters
//! - **Sort** (`sort`): Result ordering
//! - **Codec** (`codec`): Filter state to URL query string and back
//! - **Config** (`config`): Configuration management
//!
//! ## Example
//!
//! ```rust,ignore
//! use brevsok_core::{parser, Corpus, SortKey};
//!
//! let corpus = Corpus::load(Path::new("letters.json.gz"))?;
//! let filters = parser::parse("f:Olsen y:1904 storm");
//! let mut results = brevsok_core::evaluate(&corpus, &filters);
//! brevsok_core::sort_documents(&mut results, SortKey::DateDesc);
//! ```

pub mod codec;
pub mod config;
pub mod corpus;
pub mod error;
pub mod eval;
pub mod facet;
pub mod filter;
pub mod parser;
pub mod sort;
pub mod text;
pub mod types;

// Re-export commonly used types
pub use codec::UrlState;
pub use config::Config;
pub use corpus::{Corpus, CorpusStats, MetadataIndex};
pub use error::{BrevsokError, Result};
pub use eval::{evaluate, matches};
pub use facet::{Facet, FacetSpec, MatchMode, Polarity, ValueMatch, FACETS};
pub use filter::{DateRange, FilterState};
pub use parser::{parse, parse_into};
pub use sort::{sort_documents, SortKey};
pub use text::{matches_query, TextQuery};
pub use types::{fields, LetterDocument, LetterFile, LetterId};
