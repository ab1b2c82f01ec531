//! Lexicon sentiment scoring.

use urgency_types::SentimentScore;

use crate::lexicon::Lexicon;

/// Sums per-token lexicon weights.
///
/// Out-of-vocabulary tokens contribute 0. The sum is not divided by the
/// token count, so longer complaints can reach larger magnitudes; the
/// classifier thresholds are tuned against these raw sums.
#[inline]
pub fn score_tokens<S: AsRef<str>>(tokens: &[S], lexicon: &Lexicon) -> SentimentScore {
    // Start from +0.0: an empty fold must not report a negative zero.
    let score = tokens
        .iter()
        .fold(0.0_f64, |acc, token| acc + lexicon.score_of(token.as_ref()));
    SentimentScore::new(score)
}
