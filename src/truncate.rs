//! Prompt-size truncation policy.
//!
//! Bounds the outbound payload to the completion API regardless of document
//! size. The cut is a hard character boundary, not a sentence boundary, and
//! the budget is counted in characters rather than model tokens.

use std::borrow::Cow;

/// Maximum number of characters sent to the model.
pub const MAX_PROMPT_CHARS: usize = 30_000;

/// Suffix appended when the text was cut.
pub const TRUNCATION_MARKER: &str = "...[text truncated because it's too long]";

/// Cap `text` at [`MAX_PROMPT_CHARS`] characters, appending the marker when
/// a cut happened. Texts at or under the budget pass through unchanged.
pub fn clamp(text: &str) -> Cow<'_, str> {
    clamp_to(text, MAX_PROMPT_CHARS)
}

fn clamp_to(text: &str, limit: usize) -> Cow<'_, str> {
    match text.char_indices().nth(limit) {
        None => Cow::Borrowed(text),
        Some((byte_offset, _)) => {
            let mut cut = String::with_capacity(byte_offset + TRUNCATION_MARKER.len());
            cut.push_str(&text[..byte_offset]);
            cut.push_str(TRUNCATION_MARKER);
            Cow::Owned(cut)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_identity() {
        let text = "hello world";
        assert!(matches!(clamp(text), Cow::Borrowed(_)));
        assert_eq!(clamp(text), text);
    }

    #[test]
    fn text_at_the_budget_is_identity() {
        let text = "a".repeat(MAX_PROMPT_CHARS);
        assert_eq!(clamp(&text), text);
    }

    #[test]
    fn long_text_is_cut_with_marker() {
        let text = "b".repeat(MAX_PROMPT_CHARS + 1);
        let clamped = clamp(&text);
        assert_eq!(
            clamped.chars().count(),
            MAX_PROMPT_CHARS + TRUNCATION_MARKER.chars().count()
        );
        assert!(clamped.starts_with(&text[..MAX_PROMPT_CHARS]));
        assert!(clamped.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn cut_lands_on_a_char_boundary() {
        // Multibyte characters must not be split mid-sequence.
        let text = "é".repeat(10);
        let clamped = clamp_to(&text, 4);
        assert!(clamped.starts_with("éééé"));
        assert!(clamped.ends_with(TRUNCATION_MARKER));
    }
}
