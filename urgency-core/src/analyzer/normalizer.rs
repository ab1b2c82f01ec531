//! Complaint text normalization.
//!
//! Produces the canonical form that both the sentiment scorer and the
//! keyword matcher read: lowercase, punctuation removed, hyphens kept,
//! whitespace runs collapsed into single ASCII spaces.

/// Whitespace as recognized by the legacy complaint pipeline.
///
/// This is the ECMAScript `\s` class, which differs from
/// [`char::is_whitespace`]: it includes U+FEFF and excludes U+0085.
#[inline(always)]
pub(crate) const fn is_text_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// ASCII word character: `[A-Za-z0-9_]`.
#[inline(always)]
const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Configuration options for text normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizerConfig {
    /// When enabled, folds accented Latin letters to their ASCII base before
    /// punctuation is removed, so "café" becomes "cafe" instead of "caf".
    ///
    /// Off by default: lexicon data and thresholds are tuned against the
    /// unfolded behavior.
    pub fold_diacritics: bool,
}

/// Complaint text normalizer.
///
/// Performs the following operations:
/// - Converts all characters to lowercase (Unicode-aware)
/// - Removes every character that is not an ASCII word character,
///   whitespace, or `-`
/// - Collapses whitespace runs into single spaces and trims both ends
///
/// The output satisfies the [`Tokenizer`](super::Tokenizer) input contract.
///
/// # Examples
///
/// ```
/// use urgency_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("Help NOW, it's well-lit!"), "help now its well-lit");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let fold = self.config.fold_diacritics;
        let mut pending_space = false;

        for ch in input.chars() {
            if ch.is_ascii() {
                let b = ch as u8;
                if is_word_byte(b) || b == b'-' {
                    push_kept(out, &mut pending_space, b.to_ascii_lowercase() as char);
                } else if is_text_whitespace(ch) {
                    pending_space = true;
                }
                continue;
            }

            if is_text_whitespace(ch) {
                pending_space = true;
                continue;
            }

            for lowered in ch.to_lowercase() {
                let lowered = if fold { fold_latin(lowered) } else { lowered };
                if lowered.is_ascii() && (is_word_byte(lowered as u8) || lowered == '-') {
                    push_kept(out, &mut pending_space, lowered);
                }
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

#[inline(always)]
fn push_kept(out: &mut String, pending_space: &mut bool, c: char) {
    if *pending_space && !out.is_empty() {
        out.push(' ');
    }
    *pending_space = false;
    out.push(c);
}

/// Maps lowercase accented Latin letters to their ASCII base letter.
#[inline(always)]
fn fold_latin(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' | 'æ' => 'a',
        'ç' | 'ć' | 'č' | 'ĉ' | 'ċ' => 'c',
        'ð' | 'đ' => 'd',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ñ' | 'ń' | 'ň' | 'ņ' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' | 'ŏ' | 'ő' | 'œ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ś' | 'š' | 'ş' | 'ß' => 's',
        'ź' | 'ž' | 'ż' => 'z',
        'ł' => 'l',
        _ => c,
    }
}
