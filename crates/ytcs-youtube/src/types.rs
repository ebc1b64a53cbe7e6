//! `YouTube` Data API v3 response types.
//!
//! Only the fields `ytcs` reads are modeled; everything else in the
//! payload is ignored by serde.

use serde::Deserialize;
use ytcs_core::Comment;

// ---------------------------------------------------------------------------
// videos.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct Video {
    pub snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
}

// ---------------------------------------------------------------------------
// commentThreads.list
// ---------------------------------------------------------------------------

/// One page of `commentThreads.list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    /// Continuation cursor; absent (or empty) on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub author_display_name: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub text_display: String,
}

impl From<CommentThread> for Comment {
    fn from(thread: CommentThread) -> Self {
        let s = thread.snippet.top_level_comment.snippet;
        Comment {
            author: s.author_display_name,
            published_at: s.published_at,
            updated_at: s.updated_at,
            like_count: s.like_count,
            text: s.text_display,
        }
    }
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// Google API error body: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}
