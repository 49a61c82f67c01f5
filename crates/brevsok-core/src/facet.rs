//! Facet descriptions shared by the query parser and the filter evaluator.
//!
//! Each filterable dimension (creator, year, tag, location, destination) is
//! declared once in [`FACETS`]; both the parser's prefix dispatch and the
//! evaluator's matching drive off the same table instead of keeping parallel
//! per-facet branches.
//!
//! Two asymmetries are deliberate and declared here rather than buried in
//! code:
//!
//! - Tags are the one facet with AND semantics across selected values
//!   ([`MatchMode::All`]); every other facet ORs its selections.
//! - Years match the four-digit date prefix exactly
//!   ([`ValueMatch::ExactYear`]) while the other facets use case-insensitive
//!   substring containment.

/// A named dimension of filtering with positive and negative value sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Creator,
    Year,
    Tag,
    Location,
    Destination,
}

/// Whether a filter's positive or negative set is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// The other polarity.
    pub fn opposite(self) -> Polarity {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }
}

/// How multiple selected values of one facet combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// A document matches if any selected value matches (OR)
    Any,
    /// A document matches only if every selected value matches (AND)
    All,
}

/// How a single selected value is tested against a document value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMatch {
    /// Case-insensitive substring containment
    Substring,
    /// Exact match against the four-digit year prefix of the letter date
    ExactYear,
}

/// Static description of one facet.
#[derive(Debug)]
pub struct FacetSpec {
    pub facet: Facet,

    /// Query mini-language prefixes (all case-insensitive)
    pub prefixes: &'static [&'static str],

    /// Multi-selection facets accumulate values across parses; the others
    /// are replaced when a new prefixed token arrives
    pub multi_valued: bool,

    /// Combination rule across selected positive values. Exclusion is always
    /// `Any`: one matching negative value excludes the document.
    pub match_mode: MatchMode,

    /// Per-value comparison rule
    pub value_match: ValueMatch,

    /// Query-string key for the positive set (repeated per value)
    pub query_key: &'static str,

    /// Query-string key for the negative set
    pub negative_query_key: &'static str,
}

/// The facet table. Parser, evaluator and codec all iterate this.
pub const FACETS: &[FacetSpec] = &[
    FacetSpec {
        facet: Facet::Creator,
        prefixes: &["from", "f", "creator", "c"],
        multi_valued: false,
        match_mode: MatchMode::Any,
        value_match: ValueMatch::Substring,
        query_key: "creators",
        negative_query_key: "creatorsNegative",
    },
    FacetSpec {
        facet: Facet::Year,
        prefixes: &["year", "y"],
        multi_valued: true,
        match_mode: MatchMode::Any,
        value_match: ValueMatch::ExactYear,
        query_key: "years",
        negative_query_key: "yearsNegative",
    },
    FacetSpec {
        facet: Facet::Tag,
        prefixes: &["tag", "t"],
        multi_valued: true,
        match_mode: MatchMode::All,
        value_match: ValueMatch::Substring,
        query_key: "tags",
        negative_query_key: "tagsNegative",
    },
    FacetSpec {
        facet: Facet::Location,
        prefixes: &["location", "l"],
        multi_valued: false,
        match_mode: MatchMode::Any,
        value_match: ValueMatch::Substring,
        query_key: "locations",
        negative_query_key: "locationsNegative",
    },
    FacetSpec {
        facet: Facet::Destination,
        prefixes: &["destination", "d"],
        multi_valued: false,
        match_mode: MatchMode::Any,
        value_match: ValueMatch::Substring,
        query_key: "destinations",
        negative_query_key: "destinationsNegative",
    },
];

impl Facet {
    /// The static description of this facet.
    pub fn spec(self) -> &'static FacetSpec {
        match self {
            Facet::Creator => &FACETS[0],
            Facet::Year => &FACETS[1],
            Facet::Tag => &FACETS[2],
            Facet::Location => &FACETS[3],
            Facet::Destination => &FACETS[4],
        }
    }

    /// Resolve a mini-language prefix (case-insensitive) to its facet.
    pub fn from_prefix(prefix: &str) -> Option<Facet> {
        FACETS
            .iter()
            .find(|spec| spec.prefixes.iter().any(|p| p.eq_ignore_ascii_case(prefix)))
            .map(|spec| spec.facet)
    }

    /// Canonical long-form prefix, used for display.
    pub fn canonical_prefix(self) -> &'static str {
        self.spec().prefixes[0]
    }
}
