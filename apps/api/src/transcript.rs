//! Transcript Input — blank check and tail trimming before anything reaches the LLM.

use crate::errors::AppError;

/// Only the tail of a long transcript is sent onward.
pub const MAX_TRANSCRIPT_CHARS: usize = 2000;

pub const DEFAULT_RECIPIENT: &str = "student@example.com";

/// Rejects whitespace-only transcripts.
pub fn validate_transcript(raw: &str) -> Result<&str, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::EmptyInput);
    }
    Ok(raw)
}

/// Returns the last `MAX_TRANSCRIPT_CHARS` characters of `raw`.
///
/// Counts chars, not bytes, so a multi-byte character is never split.
pub fn trim_transcript(raw: &str) -> &str {
    let total = raw.chars().count();
    if total <= MAX_TRANSCRIPT_CHARS {
        return raw;
    }
    let skip = total - MAX_TRANSCRIPT_CHARS;
    match raw.char_indices().nth(skip) {
        Some((offset, _)) => &raw[offset..],
        None => raw,
    }
}

/// Falls back to the default address only when the field is absent. A blank
/// value is kept so live send can reject it.
pub fn resolve_recipient(recipient: Option<&str>) -> String {
    recipient.map(str::trim).unwrap_or(DEFAULT_RECIPIENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_transcript_is_rejected() {
        assert!(matches!(validate_transcript(""), Err(AppError::EmptyInput)));
        assert!(matches!(
            validate_transcript("  \n\t "),
            Err(AppError::EmptyInput)
        ));
    }

    #[test]
    fn test_non_blank_transcript_passes_untouched() {
        assert_eq!(validate_transcript(" hi ").unwrap(), " hi ");
    }

    #[test]
    fn test_exactly_limit_is_unmodified() {
        let input = "a".repeat(MAX_TRANSCRIPT_CHARS);
        assert_eq!(trim_transcript(&input), input);
    }

    #[test]
    fn test_one_over_limit_drops_first_char() {
        let input = format!("X{}", "a".repeat(MAX_TRANSCRIPT_CHARS));
        let trimmed = trim_transcript(&input);
        assert_eq!(trimmed.chars().count(), MAX_TRANSCRIPT_CHARS);
        assert!(!trimmed.contains('X'));
        assert_eq!(trimmed, &input[1..]);
    }

    #[test]
    fn test_long_transcript_keeps_tail() {
        let input = format!("{}END", "b".repeat(5000));
        let trimmed = trim_transcript(&input);
        assert_eq!(trimmed.chars().count(), MAX_TRANSCRIPT_CHARS);
        assert!(trimmed.ends_with("END"));
    }

    #[test]
    fn test_multibyte_chars_counted_as_chars() {
        // 2001 two-byte characters; a byte slice would land mid-character.
        let input = "é".repeat(MAX_TRANSCRIPT_CHARS + 1);
        let trimmed = trim_transcript(&input);
        assert_eq!(trimmed.chars().count(), MAX_TRANSCRIPT_CHARS);
        assert_eq!(trimmed.len(), MAX_TRANSCRIPT_CHARS * 2);
    }

    #[test]
    fn test_recipient_defaults() {
        assert_eq!(resolve_recipient(None), DEFAULT_RECIPIENT);
        assert_eq!(resolve_recipient(Some(" a@b.co ")), "a@b.co");
    }

    #[test]
    fn test_blank_recipient_is_kept_blank() {
        assert_eq!(resolve_recipient(Some("")), "");
        assert_eq!(resolve_recipient(Some("   ")), "");
    }
}
