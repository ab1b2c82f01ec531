//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Lowercases and strips punctuation, keeping hyphens
//! - **Tokenizer**: Splits normalized text into whitespace-separated tokens

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use tokenizer::{Tokenizer, Tokens};

/// Normalizes and tokenizes text into owned tokens.
///
/// Convenience for callers that do not keep a normalization buffer around.
/// The engine itself borrows tokens from a reused buffer instead.
pub fn normalize_tokens(text: &str) -> Vec<String> {
    let normalized = TextNormalizer::default().normalize(text);
    Tokenizer::new()
        .tokens(&normalized)
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_tokens_matches_legacy_split() {
        assert_eq!(
            normalize_tokens("Please HELP now, this is dangerous!"),
            vec!["please", "help", "now", "this", "is", "dangerous"]
        );
    }

    #[test]
    fn normalize_tokens_drops_empty_tokens() {
        assert!(normalize_tokens("  ...  ").is_empty());
        assert_eq!(normalize_tokens("  a  "), vec!["a"]);
    }
}
