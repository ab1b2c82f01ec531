//! Analysis orchestrator.
//!
//! [`UrgencyEngine::analyze`] is the single entry point the rest of the
//! complaint system depends on. It validates input, awaits the lexicon
//! (the only suspension point), and then runs the synchronous pipeline:
//!
//! ```text
//! normalize -> tokenize -> { score, match keywords } -> classify
//! ```
//!
//! Outcomes:
//! - `Ok(Some(result))`: the complaint is `High` or `Critical`
//! - `Ok(None)`: not urgent, or the input was not applicable
//! - `Err(_)`: the lexicon is unavailable; nothing was classified

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};
use urgency_types::{AnalysisResult, InvalidInput, ValidText};

use crate::analyzer::{NormalizerConfig, TextNormalizer, Tokenizer};
use crate::error::AnalyzeError;
use crate::lexicon::{Lexicon, LexiconCache};
use crate::scoring::{score_tokens, Classification, KeywordSet, MatchMode};

/// Extracts analyzable text from an untyped value.
///
/// # Errors
///
/// `Null` is [`InvalidInput::Missing`], any other non-string is
/// [`InvalidInput::NotText`], and blank strings are [`InvalidInput::Empty`].
pub fn text_from_value(value: &Value) -> Result<ValidText<'_>, InvalidInput> {
    match value {
        Value::String(text) => ValidText::try_from(text.as_str()),
        Value::Null => Err(InvalidInput::Missing),
        _ => Err(InvalidInput::NotText),
    }
}

/// Lexicon-driven urgency classifier.
///
/// `Send + Sync`; share it behind an `Arc` across tasks.
#[derive(Debug)]
pub struct UrgencyEngine {
    cache: Arc<LexiconCache>,
    keywords: KeywordSet,
    match_mode: MatchMode,
    normalizer: TextNormalizer,
    analyses: AtomicU64,
    surfaced: AtomicU64,
}

impl UrgencyEngine {
    /// Creates an engine with the default keyword set and substring matching.
    pub fn new(cache: Arc<LexiconCache>) -> Self {
        Self {
            cache,
            keywords: KeywordSet::default(),
            match_mode: MatchMode::default(),
            normalizer: TextNormalizer::default(),
            analyses: AtomicU64::new(0),
            surfaced: AtomicU64::new(0),
        }
    }

    /// Replaces the urgency keyword set.
    #[must_use]
    pub fn with_keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = keywords;
        self
    }

    /// Selects how tokens are matched against keywords.
    #[must_use]
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Replaces the normalizer configuration.
    #[must_use]
    pub fn with_normalizer(mut self, config: NormalizerConfig) -> Self {
        self.normalizer = TextNormalizer::new(config);
        self
    }

    /// The lexicon cache this engine reads from.
    pub fn cache(&self) -> &Arc<LexiconCache> {
        &self.cache
    }

    /// The active keyword set.
    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// The active match mode.
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Analyzes optional complaint text.
    ///
    /// Absent, empty, and whitespace-only inputs return `Ok(None)` without
    /// touching the lexicon.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::LexiconUnavailable`] if the lexicon cannot be
    /// loaded.
    pub async fn analyze(&self, input: Option<&str>) -> Result<Option<AnalysisResult>, AnalyzeError> {
        match ValidText::parse(input) {
            Ok(text) => self.analyze_text(text).await,
            Err(reason) => {
                trace!(%reason, "input not applicable");
                Ok(None)
            }
        }
    }

    /// Analyzes an untyped value; non-string values return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Same as [`analyze`](Self::analyze).
    pub async fn analyze_value(&self, value: &Value) -> Result<Option<AnalysisResult>, AnalyzeError> {
        match text_from_value(value) {
            Ok(text) => self.analyze_text(text).await,
            Err(reason) => {
                trace!(%reason, "input not applicable");
                Ok(None)
            }
        }
    }

    /// Analyzes text that already passed validation.
    ///
    /// # Errors
    ///
    /// Same as [`analyze`](Self::analyze).
    pub async fn analyze_text(&self, text: ValidText<'_>) -> Result<Option<AnalysisResult>, AnalyzeError> {
        let lexicon = self.cache.get().await?;

        self.analyses.fetch_add(1, Ordering::Relaxed);
        let classification = self.classify_text(text.as_str(), &lexicon);

        let Some(urgency) = classification.urgency else {
            return Ok(None);
        };

        self.surfaced.fetch_add(1, Ordering::Relaxed);
        Ok(Some(AnalysisResult {
            text: text.as_str().to_owned(),
            sentiment: classification.sentiment.sentiment,
            score: classification.sentiment.score,
            urgency,
        }))
    }

    /// Runs the synchronous pipeline over raw text with a given lexicon.
    pub fn classify_text(&self, text: &str, lexicon: &Lexicon) -> Classification {
        let normalized = self.normalizer.normalize(text);
        let tokens = Tokenizer::new().tokens(&normalized);
        self.classify_tokens(&tokens, lexicon)
    }

    /// Scores, matches, and classifies an already-tokenized complaint.
    pub fn classify_tokens<S: AsRef<str>>(&self, tokens: &[S], lexicon: &Lexicon) -> Classification {
        let sentiment = score_tokens(tokens, lexicon);
        let hit = self.keywords.first_match(tokens, &self.match_mode);
        if let Some((token, keyword)) = hit {
            debug!(token, keyword, "urgency keyword matched");
        }

        let classification = Classification::from_signals(sentiment, hit.is_some());
        debug!(
            tokens = tokens.len(),
            score = classification.sentiment.score,
            sentiment = %classification.sentiment.sentiment,
            urgency = ?classification.urgency,
            "complaint classified"
        );
        classification
    }

    /// Returns basic counters about the engine's operation.
    #[must_use]
    pub fn metrics(&self) -> EngineMetrics {
        EngineMetrics {
            analyses_run: self.analyses.load(Ordering::Relaxed),
            urgent_results: self.surfaced.load(Ordering::Relaxed),
            lexicon_fetches: self.cache.fetch_count() as u64,
        }
    }
}

/// Basic operational counters for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Texts that reached classification (invalid input is not counted).
    pub analyses_run: u64,
    /// Classifications surfaced as `High` or `Critical`.
    pub urgent_results: u64,
    /// Fetches started against the lexicon source.
    pub lexicon_fetches: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::StaticSource;
    use urgency_types::{Sentiment, Urgency};

    const LEXICON: &str = "help\t0\ndanger\t-3\ndangerous\t-2.1\nneed\t-1\ngood\t1.9\n";

    fn engine(text: &'static str) -> UrgencyEngine {
        let cache = LexiconCache::new(Arc::new(StaticSource::new("test", text)));
        UrgencyEngine::new(Arc::new(cache))
    }

    #[tokio::test]
    async fn urgent_keyword_with_strong_negativity_is_critical() {
        let engine = engine(LEXICON);
        let result = engine
            .analyze(Some("please help now, this is dangerous"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.urgency, Urgency::Critical);
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.score, -2.1);
        assert_eq!(result.text, "please help now, this is dangerous");
    }

    #[tokio::test]
    async fn mild_negativity_without_keyword_is_suppressed() {
        let engine = engine(LEXICON);
        assert_eq!(engine.analyze(Some("I need assistance soon")).await, Ok(None));
    }

    #[tokio::test]
    async fn invalid_input_never_loads_lexicon() {
        let engine = engine(LEXICON);

        assert_eq!(engine.analyze(None).await, Ok(None));
        assert_eq!(engine.analyze(Some("")).await, Ok(None));
        assert_eq!(engine.analyze(Some("  \n ")).await, Ok(None));
        assert_eq!(engine.analyze_value(&Value::from(42)).await, Ok(None));
        assert_eq!(engine.analyze_value(&Value::Null).await, Ok(None));
        assert_eq!(engine.analyze_value(&serde_json::json!(["help"])).await, Ok(None));

        assert_eq!(engine.cache().fetch_count(), 0);
        assert_eq!(engine.metrics().analyses_run, 0);
    }

    #[tokio::test]
    async fn string_values_are_analyzed() {
        let engine = engine(LEXICON);
        let result = engine
            .analyze_value(&Value::from("tabang karon"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.urgency, Urgency::High);
    }

    #[tokio::test]
    async fn exact_mode_removes_substring_hits() {
        let engine = engine(LEXICON).with_match_mode(MatchMode::ExactToken);
        assert_eq!(engine.analyze(Some("nowhere to go")).await, Ok(None));

        let substring = self::engine(LEXICON);
        assert!(substring.analyze(Some("nowhere to go")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn custom_keywords_replace_defaults() {
        let engine = engine(LEXICON).with_keywords(KeywordSet::new(["fire"]));
        assert_eq!(engine.analyze(Some("help")).await, Ok(None));
        assert!(engine.analyze(Some("there is a fire")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn lexicon_failure_is_an_error_not_none() {
        let engine = engine("no tabs here\n");
        let err = engine.analyze(Some("help now")).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::LexiconUnavailable(_)));
    }

    #[tokio::test]
    async fn repeated_calls_are_idempotent() {
        let engine = engine(LEXICON);
        let a = engine.analyze(Some("Danger! Help!")).await.unwrap();
        let b = engine.analyze(Some("Danger! Help!")).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(engine.metrics().lexicon_fetches, 1);
        assert_eq!(engine.metrics().analyses_run, 2);
        assert_eq!(engine.metrics().urgent_results, 2);
    }

    #[test]
    fn classify_tokens_is_pure() {
        let engine = engine(LEXICON);
        let lexicon = Lexicon::from_entries([("sad", -2.5)]);
        let c = engine.classify_tokens(&["very", "sad"], &lexicon);
        assert!(!c.urgent_signal);
        assert_eq!(c.urgency, Some(Urgency::High));
    }

    #[test]
    fn text_from_value_classifies_shapes() {
        assert_eq!(text_from_value(&Value::Null), Err(InvalidInput::Missing));
        assert_eq!(text_from_value(&Value::Bool(true)), Err(InvalidInput::NotText));
        assert_eq!(text_from_value(&Value::from("")), Err(InvalidInput::Empty));
        assert_eq!(
            text_from_value(&Value::from("help")).map(|t| t.as_str()),
            Ok("help")
        );
    }
}
