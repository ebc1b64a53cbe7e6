//! Video identifier extraction from user-supplied URLs.

use reqwest::Url;

const CANONICAL_HOSTS: &[&str] = &["www.youtube.com", "youtube.com"];
const SHORT_LINK_HOST: &str = "youtu.be";

/// Extract the video identifier from a `YouTube` URL.
///
/// Recognizes `https://www.youtube.com/watch?v=<id>` (also without `www.`)
/// and `https://youtu.be/<id>`. Returns `None` for any other host, for a
/// canonical URL without a non-empty `v` parameter, for a short link
/// without a path segment, and for input that does not parse as a URL.
#[must_use]
pub fn resolve_video_id(input: &str) -> Option<String> {
    let url = match Url::parse(input.trim()) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(input, error = %e, "could not parse URL");
            return None;
        }
    };

    let host = url.host_str()?;
    if CANONICAL_HOSTS.contains(&host) {
        url.query_pairs()
            .find(|(key, value)| key == "v" && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    } else if host == SHORT_LINK_HOST {
        url.path_segments()?
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_watch_url() {
        assert_eq!(
            resolve_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn canonical_without_www_and_extra_params() {
        assert_eq!(
            resolve_video_id("https://youtube.com/watch?list=PL123&v=abc_-123&t=42s").as_deref(),
            Some("abc_-123")
        );
    }

    #[test]
    fn short_link() {
        assert_eq!(
            resolve_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn short_link_ignores_query_and_trailing_segments() {
        assert_eq!(
            resolve_video_id("https://youtu.be/dQw4w9WgXcQ?t=30").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            resolve_video_id("https://youtu.be/abc/extra").as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            resolve_video_id("  https://youtu.be/xyz\n").as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn canonical_without_v_is_none() {
        assert_eq!(
            resolve_video_id("https://www.youtube.com/playlist?list=PL123"),
            None
        );
        assert_eq!(resolve_video_id("https://www.youtube.com/watch?v="), None);
    }

    #[test]
    fn short_link_without_path_is_none() {
        assert_eq!(resolve_video_id("https://youtu.be/"), None);
    }

    #[test]
    fn other_hosts_are_none() {
        assert_eq!(resolve_video_id("https://vimeo.com/123456789"), None);
        assert_eq!(resolve_video_id("https://m.youtube.com/watch?v=abc"), None);
    }

    #[test]
    fn unparseable_input_is_none() {
        assert_eq!(resolve_video_id("not a url"), None);
        assert_eq!(resolve_video_id(""), None);
    }
}
