//! `YouTube` Data API v3 access for `ytcs`.
//!
//! Resolves video identifiers from user-supplied URLs, looks up video titles,
//! and pages through a video's top-level comment threads.

pub mod client;
pub mod error;
pub mod title;
pub mod types;
pub mod url;

pub use client::{YoutubeClient, MAX_PAGE_SIZE};
pub use error::YoutubeError;
pub use title::{fetch_title, sanitize_title, PLACEHOLDER_TITLE};
pub use url::resolve_video_id;
