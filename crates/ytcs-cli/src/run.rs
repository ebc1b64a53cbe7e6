//! One end-to-end run: URL → title → comments → sentiment → CSV.

use std::path::{Path, PathBuf};

use thiserror::Error;
use ytcs_sentiment::{label_comments, SentimentError, TextClassifier};
use ytcs_youtube::{fetch_title, resolve_video_id, YoutubeClient, YoutubeError};

use crate::export;

/// A run that ended before writing output.
///
/// Each variant's message is what the user sees.
#[derive(Debug, Error)]
pub(crate) enum RunError {
    #[error("Invalid YouTube URL. Please enter a valid URL.")]
    InvalidUrl,

    #[error("Failed to retrieve comments: {0}")]
    Comments(#[source] YoutubeError),

    #[error("Failed to load the sentiment model: {0}")]
    Classifier(#[from] SentimentError),

    #[error("Failed to write results: {0}")]
    Export(#[from] csv::Error),
}

/// What a successful run produced.
#[derive(Debug)]
pub(crate) struct RunReport {
    pub path: PathBuf,
    pub rows: usize,
    /// Rows whose label is the `unknown` placeholder.
    pub unknown_labels: usize,
    /// Whether the filename uses the placeholder title.
    pub placeholder_title: bool,
}

/// Process the video at `url_input` and write its CSV into `output_dir`.
///
/// Title and per-comment sentiment failures degrade to placeholders.
/// An unresolvable URL or any comment page failure stops the run before
/// anything is written.
///
/// # Errors
///
/// Returns [`RunError`] for the fatal cases above and for write failures.
pub(crate) async fn run<C: TextClassifier + ?Sized>(
    client: &YoutubeClient,
    classifier: &C,
    url_input: &str,
    output_dir: &Path,
) -> Result<RunReport, RunError> {
    let video_id = resolve_video_id(url_input).ok_or(RunError::InvalidUrl)?;
    tracing::info!(video_id = %video_id, "resolved video id");

    let meta = fetch_title(client, &video_id).await;
    let comments = client
        .fetch_all_comments(&meta.video_id)
        .await
        .map_err(RunError::Comments)?;

    let labeled = label_comments(classifier, comments);

    let path = export::output_path(output_dir, meta.title.value());
    export::write_csv(&path, &labeled)?;

    Ok(RunReport {
        path,
        rows: labeled.len(),
        unknown_labels: labeled
            .iter()
            .filter(|c| c.sentiment.is_placeholder())
            .count(),
        placeholder_title: meta.title.is_placeholder(),
    })
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
