use crate::error::SentimentError;

/// Longest input, in characters, passed to the model.
pub const MAX_INPUT_CHARS: usize = 512;

/// Label recorded when classification fails.
pub const UNKNOWN_LABEL: &str = "unknown";

/// A single-label text classifier.
///
/// The pipeline only depends on this trait, so tests can swap the real
/// model for a stub.
pub trait TextClassifier {
    /// Return the highest-confidence label for `text`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if tokenization or inference fails.
    fn classify(&self, text: &str) -> Result<String, SentimentError>;
}

/// Keep at most the first `max_chars` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
