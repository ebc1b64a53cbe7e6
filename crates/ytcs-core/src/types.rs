/// A top-level comment as returned by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Author display name.
    pub author: String,
    /// Publication timestamp, verbatim from the API (RFC 3339).
    pub published_at: String,
    /// Last edit timestamp, verbatim from the API.
    pub updated_at: String,
    pub like_count: u64,
    /// Comment body as plain text.
    pub text: String,
}

/// A value that either came from its real source or is a fixed stand-in
/// used after a non-critical failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Authoritative(T),
    Placeholder { value: T, reason: String },
}

impl<T> Outcome<T> {
    /// Build a placeholder from any displayable failure.
    pub fn placeholder(value: T, reason: impl std::fmt::Display) -> Self {
        Self::Placeholder {
            value,
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Authoritative(value) | Self::Placeholder { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Authoritative(value) | Self::Placeholder { value, .. } => value,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// A comment paired with its sentiment label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledComment {
    pub comment: Comment,
    pub sentiment: Outcome<String>,
}

/// Identifier and filesystem-safe title of the video being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub video_id: String,
    pub title: Outcome<String>,
}
