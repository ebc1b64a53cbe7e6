//! Video title lookup and filename sanitization.

use ytcs_core::{Outcome, VideoMetadata};

use crate::client::YoutubeClient;

/// Title used when the real title cannot be fetched.
pub const PLACEHOLDER_TITLE: &str = "Unknown_Video";

/// Characters that are unsafe in filenames on common filesystems.
const DENYLIST: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replace every denylisted character with `_`, one for one.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    title.replace(DENYLIST, "_")
}

/// Fetch and sanitize the title for `video_id`.
///
/// Never fails: any client error yields [`PLACEHOLDER_TITLE`] wrapped in
/// [`Outcome::Placeholder`], logged at `warn`.
pub async fn fetch_title(client: &YoutubeClient, video_id: &str) -> VideoMetadata {
    let title = match client.fetch_video_title(video_id).await {
        Ok(raw) => Outcome::Authoritative(sanitize_title(&raw)),
        Err(e) => {
            tracing::warn!(video_id, error = %e, "error fetching video title; using placeholder");
            Outcome::placeholder(PLACEHOLDER_TITLE.to_string(), e)
        }
    };

    VideoMetadata {
        video_id: video_id.to_string(),
        title,
    }
}
