//! Whitespace tokenizer.
//!
//! Splits normalized complaint text into the tokens that the scorer and the
//! keyword matcher consume. Given `"please help now"` it emits:
//!
//! ```ignore
//! ("please", 0)
//! ("help", 1)
//! ("now", 2)
//! ```
//!
//! ## The Input Contract
//!
//! The tokenizer expects output of [`TextNormalizer`](super::TextNormalizer):
//! - No leading or trailing whitespace
//! - Words separated by exactly one ASCII space
//!
//! Violations panic in debug builds.

use core::str;
use memchr::memchr_iter;
use smallvec::SmallVec;

/// Token list for one complaint. Most complaints fit inline.
pub type Tokens<'n> = SmallVec<[&'n str; 32]>;

/// Streaming tokenizer - splits normalized text into tokens.
///
/// Tokens are slices of the normalized buffer; nothing is copied.
///
/// ```
/// use urgency_core::analyzer::Tokenizer;
///
/// let tokens = Tokenizer::new().tokens("tabang karon");
/// assert_eq!(tokens.as_slice(), &["tabang", "karon"]);
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes normalized input and emits `(text, position)`.
    #[inline]
    pub fn tokenize<'n, F>(&self, normalized: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, u32),
    {
        let bytes = normalized.as_bytes();

        debug_assert!(
            bytes.first().is_none_or(|&b| b != b' '),
            "tokenizer: leading whitespace; normalizer contract violated"
        );
        debug_assert!(
            bytes.last().is_none_or(|&b| b != b' '),
            "tokenizer: trailing whitespace; normalizer contract violated"
        );
        debug_assert!(
            !normalized.contains("  "),
            "tokenizer: consecutive spaces; normalizer contract violated"
        );

        if bytes.is_empty() {
            return;
        }

        let mut start = 0usize;
        let mut pos = 0u32;

        for i in memchr_iter(b' ', bytes) {
            if start < i {
                // Splitting on ASCII space never lands inside a UTF-8 sequence.
                if let Ok(text) = str::from_utf8(&bytes[start..i]) {
                    emit(text, pos);
                    pos = pos.saturating_add(1);
                }
            }
            start = i + 1;
        }

        if start < bytes.len() {
            if let Ok(text) = str::from_utf8(&bytes[start..]) {
                emit(text, pos);
            }
        }
    }

    /// Collects all tokens of normalized input.
    #[inline]
    pub fn tokens<'n>(&self, normalized: &'n str) -> Tokens<'n> {
        let mut out = Tokens::new();
        self.tokenize(normalized, |text, _| out.push(text));
        out
    }
}
