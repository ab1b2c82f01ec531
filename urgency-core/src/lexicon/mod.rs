//! Sentiment lexicon: acquisition, parsing, and process-wide caching.
//!
//! - [`source`]: where the raw tab-separated text comes from
//! - [`parser`]: line-oriented parsing into a [`Lexicon`]
//! - [`cache`]: single-flight, retry-on-failure loading

pub mod cache;
pub mod parser;
pub mod source;

pub use cache::LexiconCache;
pub use parser::{parse_lexicon, LexiconEntry, ParseReport, SkipReason};
pub use source::{FileSource, LexiconSource, StaticSource};

#[cfg(feature = "http")]
pub use source::HttpSource;

use rustc_hash::FxHashMap;

/// Immutable token → score table.
///
/// Tokens are stored case-folded. Built once by the parser and shared
/// read-only behind an `Arc` for the rest of the process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    scores: FxHashMap<Box<str>, f64>,
}

impl Lexicon {
    /// Builds a lexicon from `(token, score)` pairs.
    ///
    /// Tokens are trimmed the same way lexicon lines are and lowercased;
    /// later duplicates overwrite earlier ones. Blank tokens are ignored.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::default();
        for (token, score) in entries {
            lexicon.insert(token.as_ref(), score);
        }
        lexicon
    }

    pub(crate) fn insert(&mut self, token: &str, score: f64) {
        let token = parser::trim_text(token);
        if token.is_empty() {
            return;
        }
        self.insert_folded(token.to_lowercase(), score);
    }

    /// Stores a token that is already trimmed and lowercased.
    pub(crate) fn insert_folded(&mut self, token: String, score: f64) {
        self.scores.insert(token.into_boxed_str(), score);
    }

    /// Returns the score of an exact token, if present.
    #[inline]
    #[must_use]
    pub fn get(&self, token: &str) -> Option<f64> {
        self.scores.get(token).copied()
    }

    /// Returns the score of a token, treating out-of-vocabulary tokens as 0.
    #[inline]
    #[must_use]
    pub fn score_of(&self, token: &str) -> f64 {
        self.get(token).unwrap_or(0.0)
    }

    /// Returns `true` if the token has an entry.
    #[inline]
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.scores.contains_key(token)
    }

    /// Number of distinct tokens.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` if the lexicon has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterates over `(token, score)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.scores.iter().map(|(token, score)| (&**token, *score))
    }
}
