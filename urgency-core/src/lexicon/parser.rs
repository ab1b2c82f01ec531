//! Tab-separated lexicon parsing.
//!
//! The resource is line-oriented: `<token>\t<score>[\t<extra>...]`. Extra
//! columns (VADER ships a standard deviation and raw ratings) are ignored.
//! Malformed lines are skipped with a warning; no line aborts the load.

use core::fmt;

use tracing::{info, warn};

use super::Lexicon;
use crate::analyzer::normalizer::is_text_whitespace;

/// One valid lexicon line.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    /// Trimmed, lowercased token.
    pub token: String,
    /// Signed sentiment weight.
    pub score: f64,
}

/// Why a lexicon line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The line has fewer than two tab-separated fields.
    MissingScore,
    /// The token field is empty after trimming.
    EmptyToken,
    /// The score field does not start with a finite decimal number.
    InvalidScore,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingScore => write!(f, "fewer than two tab-separated fields"),
            SkipReason::EmptyToken => write!(f, "empty token"),
            SkipReason::InvalidScore => write!(f, "score is not a finite number"),
        }
    }
}

/// Counts collected while parsing one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Valid lines, including ones later overwritten by a duplicate token.
    pub accepted: usize,
    /// Malformed lines that were skipped.
    pub skipped: usize,
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lines accepted, {} skipped", self.accepted, self.skipped)
    }
}

/// Trims the whitespace set used by the normalizer. U+0085 is not in it.
#[inline]
pub(crate) fn trim_text(s: &str) -> &str {
    s.trim_matches(is_text_whitespace)
}

/// Parses a single line.
///
/// Returns `Ok(None)` for blank lines, which are skipped silently.
///
/// # Errors
///
/// Returns the [`SkipReason`] for malformed lines.
pub fn parse_line(line: &str) -> Result<Option<LexiconEntry>, SkipReason> {
    let line = trim_text(line);
    if line.is_empty() {
        return Ok(None);
    }

    // Runs of tabs count as one separator.
    let mut fields = line.split('\t').filter(|field| !field.is_empty());
    let (Some(token), Some(score)) = (fields.next(), fields.next()) else {
        return Err(SkipReason::MissingScore);
    };

    let token = trim_text(token);
    if token.is_empty() {
        return Err(SkipReason::EmptyToken);
    }

    let score = parse_decimal_prefix(trim_text(score)).ok_or(SkipReason::InvalidScore)?;

    Ok(Some(LexiconEntry {
        token: token.to_lowercase(),
        score,
    }))
}

/// Parses a whole lexicon resource.
///
/// Skipped lines are logged at warn level with their 1-based line number.
pub fn parse_lexicon(text: &str) -> (Lexicon, ParseReport) {
    let mut lexicon = Lexicon::default();
    let mut report = ParseReport::default();

    for (index, line) in text.split('\n').enumerate() {
        match parse_line(line) {
            Ok(Some(entry)) => {
                lexicon.insert_folded(entry.token, entry.score);
                report.accepted += 1;
            }
            Ok(None) => {}
            Err(reason) => {
                report.skipped += 1;
                warn!(line = index + 1, %reason, content = line, "skipping lexicon line");
            }
        }
    }

    info!(entries = lexicon.len(), %report, "lexicon parsed");
    (lexicon, report)
}

/// Parses the longest leading decimal literal of `s`.
///
/// Accepts `[+-]?(digits[.digits*] | .digits)([eE][+-]?digits)?` and ignores
/// whatever follows, so `"1.5\u{2009}x"` yields `1.5`. Non-finite values are
/// rejected.
pub(crate) fn parse_decimal_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vader_line_with_extra_columns() {
        let entry = parse_line("danger\t-2.4\t0.8\t[-3, -2, -3]").unwrap().unwrap();
        assert_eq!(entry.token, "danger");
        assert_eq!(entry.score, -2.4);
    }

    #[test]
    fn blank_lines_skip_silently() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \r"), Ok(None));
    }

    #[test]
    fn single_field_is_rejected() {
        assert_eq!(parse_line("onlyoneword"), Err(SkipReason::MissingScore));
        assert_eq!(parse_line("word 1.0"), Err(SkipReason::MissingScore));
        assert_eq!(parse_line("word\t"), Err(SkipReason::MissingScore));
    }

    #[test]
    fn tab_runs_are_one_separator() {
        let entry = parse_line("calm\t\t\t1.3").unwrap().unwrap();
        assert_eq!(entry.score, 1.3);
    }

    #[test]
    fn non_numeric_score_is_rejected() {
        assert_eq!(parse_line("word\tabc"), Err(SkipReason::InvalidScore));
        assert_eq!(parse_line("word\t \t1"), Err(SkipReason::InvalidScore));
        assert_eq!(parse_line("word\tInfinity"), Err(SkipReason::InvalidScore));
        assert_eq!(parse_line("word\t1e400"), Err(SkipReason::InvalidScore));
    }

    #[test]
    fn token_is_trimmed_and_lowercased() {
        let entry = parse_line("  DANGER \t-2").unwrap().unwrap();
        assert_eq!(entry.token, "danger");
    }

    #[test]
    fn crlf_lines_parse() {
        let (lexicon, report) = parse_lexicon("good\t1.9\r\nbad\t-2.5\r\n");
        assert_eq!(lexicon.get("good"), Some(1.9));
        assert_eq!(lexicon.get("bad"), Some(-2.5));
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn malformed_line_does_not_abort_load() {
        let (lexicon, report) = parse_lexicon("onlyoneword\nhelp\t0\ndanger\t-3\n");
        assert_eq!(lexicon.len(), 2);
        assert!(!lexicon.contains("onlyoneword"));
        assert_eq!(lexicon.get("danger"), Some(-3.0));
        assert_eq!(report, ParseReport { accepted: 2, skipped: 1 });
    }

    #[test]
    fn last_occurrence_wins() {
        let (lexicon, report) = parse_lexicon("sad\t-1\nSad\t-2.1\n");
        assert_eq!(lexicon.get("sad"), Some(-2.1));
        assert_eq!(report.accepted, 2);
    }

    #[test]
    fn next_line_char_stays_part_of_token() {
        let (lexicon, report) = parse_lexicon("\u{85}bad\t-3\n\u{85}\t1\n");
        assert_eq!(lexicon.get("bad"), None);
        assert_eq!(lexicon.get("\u{85}bad"), Some(-3.0));
        assert_eq!(lexicon.get("\u{85}"), Some(1.0));
        assert_eq!(lexicon.len(), 2);
        assert_eq!(report, ParseReport { accepted: 2, skipped: 0 });
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "a\t1\nbroken\nb\t-2\nc\tx\n";
        assert_eq!(parse_lexicon(text).0, parse_lexicon(text).0);
    }

    #[test]
    fn decimal_prefix_forms() {
        assert_eq!(parse_decimal_prefix("1.5"), Some(1.5));
        assert_eq!(parse_decimal_prefix("-2"), Some(-2.0));
        assert_eq!(parse_decimal_prefix("+.5"), Some(0.5));
        assert_eq!(parse_decimal_prefix("3."), Some(3.0));
        assert_eq!(parse_decimal_prefix("2e2"), Some(200.0));
        assert_eq!(parse_decimal_prefix("2e"), Some(2.0));
        assert_eq!(parse_decimal_prefix("1.5abc"), Some(1.5));
        assert_eq!(parse_decimal_prefix("-1.2.3"), Some(-1.2));
    }

    #[test]
    fn decimal_prefix_rejects_non_numbers() {
        assert_eq!(parse_decimal_prefix(""), None);
        assert_eq!(parse_decimal_prefix("-"), None);
        assert_eq!(parse_decimal_prefix("."), None);
        assert_eq!(parse_decimal_prefix("e5"), None);
        assert_eq!(parse_decimal_prefix("NaN"), None);
    }
}
