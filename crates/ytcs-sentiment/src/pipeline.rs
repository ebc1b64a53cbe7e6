//! Per-comment labeling.

use ytcs_core::{Comment, LabeledComment, Outcome};

use crate::classifier::{truncate_chars, TextClassifier, MAX_INPUT_CHARS, UNKNOWN_LABEL};

/// Classify one comment text.
///
/// The text is cut to [`MAX_INPUT_CHARS`] characters first. Any classifier
/// error is logged and turned into an [`UNKNOWN_LABEL`] placeholder.
pub fn classify_comment<C: TextClassifier + ?Sized>(classifier: &C, text: &str) -> Outcome<String> {
    let input = truncate_chars(text, MAX_INPUT_CHARS);
    match classifier.classify(input) {
        Ok(label) => Outcome::Authoritative(label),
        Err(e) => {
            tracing::warn!(error = %e, "error analyzing sentiment; labeling as unknown");
            Outcome::placeholder(UNKNOWN_LABEL.to_string(), e)
        }
    }
}

/// Label every comment, preserving order and count.
pub fn label_comments<C: TextClassifier + ?Sized>(
    classifier: &C,
    comments: Vec<Comment>,
) -> Vec<LabeledComment> {
    let total = comments.len();
    let labeled: Vec<LabeledComment> = comments
        .into_iter()
        .enumerate()
        .map(|(i, comment)| {
            let sentiment = classify_comment(classifier, &comment.text);
            tracing::trace!(index = i, total, label = %sentiment.value(), "classified comment");
            LabeledComment { comment, sentiment }
        })
        .collect();

    let unknown = labeled.iter().filter(|c| c.sentiment.is_placeholder()).count();
    tracing::info!(total, unknown, "sentiment labeling complete");
    labeled
}
