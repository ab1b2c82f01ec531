//! Multilingual urgency keyword detection.
//!
//! A complaint carries an urgent signal when any of its tokens matches any
//! keyword. How a token "matches" is a [`MatchStrategy`]:
//!
//! - [`SubstringMatch`] (default): the token contains the keyword. This is
//!   the legacy behavior and it over-matches: `"nowhere"` contains `"now"`.
//! - [`ExactTokenMatch`]: the token equals the keyword.
//!
//! Multi-word keywords (`"karon dayon"`) never match a single token under
//! either strategy. They stay in the default set so that the list matches
//! the curated one.

use memchr::memmem;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// English urgency keywords.
pub const ENGLISH_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "immediately",
    "now",
    "emergency",
    "danger",
    "help",
    "unsafe",
    "harass",
    "threat",
    "violence",
    "kill",
    "hurry",
    "extremely",
];

/// Cebuano urgency keywords.
pub const CEBUANO_KEYWORDS: &[&str] = &[
    "tabang",
    "karon",
    "karon dayon",
    "palihog dali",
    "paspas",
    "hinay-hinay",
    "peligro",
    "hulga",
    "pagdali",
];

/// Tagalog urgency keywords.
pub const TAGALOG_KEYWORDS: &[&str] = &["tulong", "ngayon", "agad", "madali", "delikado", "banta"];

/// Language a default keyword belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// English
    English,
    /// Cebuano (Bisaya)
    Cebuano,
    /// Tagalog
    Tagalog,
}

impl Language {
    /// All languages in the default set, in list order.
    pub const ALL: [Language; 3] = [Language::English, Language::Cebuano, Language::Tagalog];

    /// Default keywords for this language.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Language::English => ENGLISH_KEYWORDS,
            Language::Cebuano => CEBUANO_KEYWORDS,
            Language::Tagalog => TAGALOG_KEYWORDS,
        }
    }
}

/// Decides whether one token matches one keyword.
///
/// Both arguments are already lowercase.
pub trait MatchStrategy {
    /// Returns `true` if `token` matches `keyword`.
    fn token_matches(&self, token: &str, keyword: &str) -> bool;
}

/// Legacy containment match: the token contains the keyword anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatch;

impl MatchStrategy for SubstringMatch {
    #[inline(always)]
    fn token_matches(&self, token: &str, keyword: &str) -> bool {
        memmem::find(token.as_bytes(), keyword.as_bytes()).is_some()
    }
}

/// Whole-token match.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTokenMatch;

impl MatchStrategy for ExactTokenMatch {
    #[inline(always)]
    fn token_matches(&self, token: &str, keyword: &str) -> bool {
        token == keyword
    }
}

/// Strategy selector, as read from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// [`SubstringMatch`]
    #[default]
    Substring,
    /// [`ExactTokenMatch`]
    ExactToken,
}

impl MatchStrategy for MatchMode {
    #[inline]
    fn token_matches(&self, token: &str, keyword: &str) -> bool {
        match self {
            MatchMode::Substring => SubstringMatch.token_matches(token, keyword),
            MatchMode::ExactToken => ExactTokenMatch.token_matches(token, keyword),
        }
    }
}

/// Fixed list of urgency keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<Box<str>>,
}

impl Default for KeywordSet {
    /// English, Cebuano and Tagalog defaults, in that order.
    fn default() -> Self {
        Self {
            keywords: Language::ALL
                .iter()
                .flat_map(|lang| lang.keywords())
                .map(|&kw| Box::from(kw))
                .collect(),
        }
    }
}

impl KeywordSet {
    /// Builds a set from custom keywords.
    ///
    /// Keywords are trimmed and lowercased. Blank keywords would match every
    /// token under substring matching, so they are dropped with a warning.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .filter_map(|kw| {
                let kw = kw.as_ref().trim();
                if kw.is_empty() {
                    warn!("ignoring blank urgency keyword");
                    None
                } else {
                    Some(kw.to_lowercase().into_boxed_str())
                }
            })
            .collect();
        Self { keywords }
    }

    /// Number of keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Returns `true` if the set has no keywords.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Iterates over the keywords in list order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.keywords.iter().map(|kw| &**kw)
    }

    /// Returns the first `(token, keyword)` pair that matches.
    ///
    /// Tokens are scanned left to right; for each token, keywords in list order.
    pub fn first_match<'t, S, M>(&self, tokens: &'t [S], strategy: &M) -> Option<(&'t str, &str)>
    where
        S: AsRef<str>,
        M: MatchStrategy + ?Sized,
    {
        tokens.iter().map(AsRef::as_ref).find_map(|token| {
            self.iter()
                .find(|kw| strategy.token_matches(token, kw))
                .map(|kw| (token, kw))
        })
    }

    /// Returns `true` if any token matches any keyword.
    #[inline]
    pub fn has_urgent_signal<S, M>(&self, tokens: &[S], strategy: &M) -> bool
    where
        S: AsRef<str>,
        M: MatchStrategy + ?Sized,
    {
        self.first_match(tokens, strategy).is_some()
    }
}
