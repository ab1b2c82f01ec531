//! Core types for the complaint urgency engine.
//!
//! This crate holds the values that cross the engine boundary: the
//! validated input, the polarity and urgency labels, and the result handed
//! to the presentation layer. Keeping them separate means:
//!
//! - **Stable wire shape**: Results serialize the same way for every consumer
//! - **Cross-crate compatibility**: Engine and CLI share the same types
//! - **No hidden states**: A result can only carry `High` or `Critical`

#![warn(missing_docs)]

use core::fmt;

use serde::{Deserialize, Serialize};

/// Polarity label derived from the sign of a summed lexicon score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Summed score is above zero.
    Positive,
    /// Summed score is below zero.
    Negative,
    /// Summed score is exactly zero (including texts with no known words).
    Neutral,
}

impl Sentiment {
    /// Derives the polarity from a raw score.
    ///
    /// `NaN` never occurs for scores built from finite lexicon weights; it is
    /// treated as neutral rather than panicking.
    #[inline]
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Sentiment::Positive
        } else if score < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Lowercase label, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surfaced urgency tier.
///
/// There is deliberately no `Low` variant: suppressed outcomes are
/// represented as `None` by every API that classifies text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    /// Urgent keyword present, or a strongly negative text.
    High,
    /// Urgent keyword present together with a strongly negative text.
    Critical,
}

impl Urgency {
    /// Queue rank: lower ranks are shown first.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Urgency::Critical => 1,
            Urgency::High => 2,
        }
    }

    /// Label as rendered by the dashboards.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Urgency::High => "High",
            Urgency::Critical => "Critical",
        }
    }
}

impl PartialOrd for Urgency {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Urgency {
    /// `Critical` compares greater than `High`.
    #[inline(always)]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        other.rank().cmp(&self.rank())
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summed lexicon score together with its polarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    /// Raw sum of per-token weights. Not normalized by token count.
    pub score: f64,
    /// Sign-derived label of `score`.
    pub sentiment: Sentiment,
}

impl SentimentScore {
    /// Wraps a raw score and derives its polarity.
    #[inline]
    #[must_use]
    pub fn new(score: f64) -> Self {
        Self {
            score,
            sentiment: Sentiment::from_score(score),
        }
    }
}

impl Default for SentimentScore {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Outcome of analyzing one complaint narrative.
///
/// Only ever constructed for `High` or `Critical` texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The original, unnormalized input text.
    pub text: String,
    /// Polarity of the summed score.
    pub sentiment: Sentiment,
    /// Raw summed lexicon score.
    pub score: f64,
    /// Surfaced urgency tier.
    pub urgency: Urgency,
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} score={:.2}: {}",
            self.urgency, self.sentiment, self.score, self.text
        )
    }
}

/// Reasons an input is not eligible for analysis.
///
/// This is a "not applicable" signal, not a failure: the engine maps it
/// to an absent result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// No value was supplied.
    Missing,
    /// A value was supplied but it is not text.
    NotText,
    /// The text is empty or contains only whitespace.
    Empty,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::Missing => write!(f, "no input supplied"),
            InvalidInput::NotText => write!(f, "input is not text"),
            InvalidInput::Empty => write!(f, "input text is empty"),
        }
    }
}

impl core::error::Error for InvalidInput {}

/// Text that passed boundary validation: present and not blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ValidText<'a>(&'a str);

impl<'a> ValidText<'a> {
    /// Validates an optional input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput::Missing` for `None` and `InvalidInput::Empty`
    /// for empty or whitespace-only text.
    pub fn parse(input: Option<&'a str>) -> Result<Self, InvalidInput> {
        match input {
            None => Err(InvalidInput::Missing),
            Some(text) => Self::try_from(text),
        }
    }

    /// Returns the validated text, unchanged.
    #[inline(always)]
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.0
    }
}

impl<'a> TryFrom<&'a str> for ValidText<'a> {
    type Error = InvalidInput;

    fn try_from(text: &'a str) -> Result<Self, Self::Error> {
        if text.trim().is_empty() {
            return Err(InvalidInput::Empty);
        }
        Ok(Self(text))
    }
}

impl fmt::Display for ValidText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_follows_sign() {
        assert_eq!(Sentiment::from_score(0.5), Sentiment::Positive);
        assert_eq!(Sentiment::from_score(-0.1), Sentiment::Negative);
        assert_eq!(Sentiment::from_score(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(-0.0), Sentiment::Neutral);
    }

    #[test]
    fn urgency_ordering_puts_critical_first() {
        assert!(Urgency::Critical > Urgency::High);

        let mut tiers = vec![Urgency::High, Urgency::Critical, Urgency::High];
        tiers.sort_by_key(|u| u.rank());
        assert_eq!(tiers, vec![Urgency::Critical, Urgency::High, Urgency::High]);
    }

    #[test]
    fn labels_match_dashboard_strings() {
        assert_eq!(Urgency::High.to_string(), "High");
        assert_eq!(Urgency::Critical.to_string(), "Critical");
        assert_eq!(Sentiment::Negative.to_string(), "negative");
    }

    #[test]
    fn result_serializes_with_plain_labels() {
        let result = AnalysisResult {
            text: "help".to_string(),
            sentiment: Sentiment::Negative,
            score: -2.5,
            urgency: Urgency::Critical,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sentiment"], "negative");
        assert_eq!(json["urgency"], "Critical");
        assert_eq!(json["score"], -2.5);
        assert_eq!(json["text"], "help");
    }

    #[test]
    fn valid_text_rejects_blank_input() {
        assert_eq!(ValidText::parse(None), Err(InvalidInput::Missing));
        assert_eq!(ValidText::parse(Some("")), Err(InvalidInput::Empty));
        assert_eq!(ValidText::parse(Some(" \t\n")), Err(InvalidInput::Empty));
    }

    #[test]
    fn valid_text_keeps_original_text() {
        let text = ValidText::parse(Some("  Help me  ")).unwrap();
        assert_eq!(text.as_str(), "  Help me  ");
    }

    #[test]
    fn sentiment_score_default_is_neutral() {
        let s = SentimentScore::default();
        assert_eq!(s.score, 0.0);
        assert_eq!(s.sentiment, Sentiment::Neutral);
    }
}
