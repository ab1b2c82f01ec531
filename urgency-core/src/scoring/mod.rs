//! Signal extraction and fusion.
//!
//! Sentiment scoring and keyword matching both read the same token list and
//! are independent of each other; the classifier combines their outputs.

pub mod classifier;
pub mod keywords;
pub mod sentiment;

pub use classifier::{classify, Classification, CRITICAL_SCORE_THRESHOLD};
pub use keywords::{ExactTokenMatch, KeywordSet, Language, MatchMode, MatchStrategy, SubstringMatch};
pub use sentiment::score_tokens;
