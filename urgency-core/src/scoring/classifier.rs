//! Urgency decision table.

use urgency_types::{Sentiment, SentimentScore, Urgency};

/// Scores at or below this value count as strongly negative.
pub const CRITICAL_SCORE_THRESHOLD: f64 = -2.0;

/// Fuses the keyword signal and the sentiment score into an urgency tier.
///
/// Rules, first match wins:
///
/// | keyword signal | score / sentiment          | outcome    |
/// |----------------|----------------------------|------------|
/// | yes            | score <= -2                | `Critical` |
/// | yes            | any                        | `High`     |
/// | no             | negative and score <= -2   | `High`     |
/// | no             | otherwise                  | `None`     |
#[inline]
#[must_use]
pub fn classify(has_urgent_signal: bool, score: f64, sentiment: Sentiment) -> Option<Urgency> {
    let strongly_negative = score <= CRITICAL_SCORE_THRESHOLD;

    if has_urgent_signal && strongly_negative {
        Some(Urgency::Critical)
    } else if has_urgent_signal {
        Some(Urgency::High)
    } else if sentiment == Sentiment::Negative && strongly_negative {
        Some(Urgency::High)
    } else {
        None
    }
}

/// Every signal computed for one complaint, surfaced or not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Summed score and its polarity.
    pub sentiment: SentimentScore,
    /// Whether any token matched an urgency keyword.
    pub urgent_signal: bool,
    /// Resulting tier, `None` when suppressed.
    pub urgency: Option<Urgency>,
}

impl Classification {
    /// Applies [`classify`] to precomputed signals.
    #[must_use]
    pub fn from_signals(sentiment: SentimentScore, urgent_signal: bool) -> Self {
        Self {
            sentiment,
            urgent_signal,
            urgency: classify(urgent_signal, sentiment.score, sentiment.sentiment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_complete() {
        use Sentiment::{Negative, Neutral, Positive};
        use Urgency::{Critical, High};

        let table = [
            (true, -5.0, Positive, Some(Critical)),
            (true, -5.0, Negative, Some(Critical)),
            (true, -5.0, Neutral, Some(Critical)),
            (true, -2.0, Positive, Some(Critical)),
            (true, -2.0, Negative, Some(Critical)),
            (true, -2.0, Neutral, Some(Critical)),
            (true, -1.0, Positive, Some(High)),
            (true, -1.0, Negative, Some(High)),
            (true, -1.0, Neutral, Some(High)),
            (true, 0.0, Positive, Some(High)),
            (true, 0.0, Negative, Some(High)),
            (true, 0.0, Neutral, Some(High)),
            (true, 1.0, Positive, Some(High)),
            (true, 1.0, Negative, Some(High)),
            (true, 1.0, Neutral, Some(High)),
            (false, -5.0, Positive, None),
            (false, -5.0, Negative, Some(High)),
            (false, -5.0, Neutral, None),
            (false, -2.0, Positive, None),
            (false, -2.0, Negative, Some(High)),
            (false, -2.0, Neutral, None),
            (false, -1.0, Positive, None),
            (false, -1.0, Negative, None),
            (false, -1.0, Neutral, None),
            (false, 0.0, Positive, None),
            (false, 0.0, Negative, None),
            (false, 0.0, Neutral, None),
            (false, 1.0, Positive, None),
            (false, 1.0, Negative, None),
            (false, 1.0, Neutral, None),
        ];

        for (signal, score, sentiment, want) in table {
            assert_eq!(
                classify(signal, score, sentiment),
                want,
                "signal={signal} score={score} sentiment={sentiment}"
            );
        }
    }

    #[test]
    fn critical_wins_over_high() {
        assert_eq!(classify(true, -2.0, Sentiment::Negative), Some(Urgency::Critical));
        assert_eq!(classify(true, -5.0, Sentiment::Negative), Some(Urgency::Critical));
    }

    #[test]
    fn keyword_alone_is_high_regardless_of_score() {
        assert_eq!(classify(true, 0.0, Sentiment::Neutral), Some(Urgency::High));
        assert_eq!(classify(true, 3.0, Sentiment::Positive), Some(Urgency::High));
        assert_eq!(classify(true, -1.9, Sentiment::Negative), Some(Urgency::High));
    }

    #[test]
    fn strong_negativity_alone_is_high() {
        assert_eq!(classify(false, -2.0, Sentiment::Negative), Some(Urgency::High));
        assert_eq!(classify(false, -1.99, Sentiment::Negative), None);
    }

    #[test]
    fn mismatched_label_does_not_escalate() {
        // Rule 3 requires the negative label, not just the score.
        assert_eq!(classify(false, -5.0, Sentiment::Neutral), None);
        assert_eq!(classify(false, -5.0, Sentiment::Positive), None);
    }

    #[test]
    fn from_signals_carries_everything() {
        let c = Classification::from_signals(SentimentScore::new(-3.0), true);
        assert_eq!(c.urgency, Some(Urgency::Critical));
        assert!(c.urgent_signal);
        assert_eq!(c.sentiment.sentiment, Sentiment::Negative);
    }
}
