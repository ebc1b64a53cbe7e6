//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API key handling, status checking, and typed
//! response deserialization for the two endpoints `ytcs` uses:
//! `videos.list` and `commentThreads.list`.

use std::time::Duration;

use reqwest::{Client, Url};
use ytcs_core::app_config::DEFAULT_YOUTUBE_BASE_URL;
use ytcs_core::Comment;

use crate::error::YoutubeError;
use crate::types::{CommentThreadListResponse, ErrorEnvelope, VideoListResponse};

/// Largest page size `commentThreads.list` accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Client for the `YouTube` Data API.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_YOUTUBE_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("ytcs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the last path segment (`/youtube/v3`).
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the raw (unsanitized) title of a video via `videos.list`.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Api`] on a non-2xx status.
    /// - [`YoutubeError::Deserialize`] if the body has an unexpected shape.
    /// - [`YoutubeError::VideoNotFound`] if `items` is empty.
    pub async fn fetch_video_title(&self, video_id: &str) -> Result<String, YoutubeError> {
        let url = self.build_url("videos", &[("part", "snippet"), ("id", video_id)])?;
        let body = self.request_json(&url).await?;

        let response: VideoListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("videos.list(id={video_id})"),
                source: e,
            })?;

        response
            .items
            .into_iter()
            .next()
            .map(|video| video.snippet.title)
            .ok_or_else(|| YoutubeError::VideoNotFound(video_id.to_string()))
    }

    /// Fetches one page of top-level comment threads.
    ///
    /// `page_token` is the continuation cursor from the previous page, or
    /// `None` for the first page.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Api`] on a non-2xx status (e.g. comments disabled).
    /// - [`YoutubeError::Deserialize`] if the body has an unexpected shape.
    pub async fn list_comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, YoutubeError> {
        let max_results = MAX_PAGE_SIZE.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let url = self.build_url("commentThreads", &params)?;
        let body = self.request_json(&url).await?;

        serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
            context: format!("commentThreads.list(videoId={video_id})"),
            source: e,
        })
    }

    /// Fetches every top-level comment on a video, following continuation
    /// cursors until the last page.
    ///
    /// Comments are returned in the order the API delivered them, one per
    /// thread, with no deduplication.
    ///
    /// # Errors
    ///
    /// Returns the first page error. Comments collected from earlier pages
    /// are discarded: the caller gets either the complete set or nothing.
    pub async fn fetch_all_comments(&self, video_id: &str) -> Result<Vec<Comment>, YoutubeError> {
        let mut comments = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page = 0u32;

        loop {
            page += 1;
            let response = self
                .list_comment_threads(video_id, page_token.as_deref())
                .await
                .inspect_err(|e| {
                    tracing::error!(video_id, page, error = %e, "error fetching comments");
                })?;

            tracing::debug!(
                video_id,
                page,
                count = response.items.len(),
                "fetched comment page"
            );
            comments.extend(response.items.into_iter().map(Comment::from));

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::info!(video_id, pages = page, total = comments.len(), "fetched all comments");
        Ok(comments)
    }

    /// Builds the endpoint URL with the API key and percent-encoded params.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request and parses the body as JSON.
    ///
    /// Non-2xx responses become [`YoutubeError::Api`], carrying the message
    /// from Google's error envelope when one is present.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|env| env.error.message)
                .unwrap_or(body);
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
