use regex::Regex;
use url::Url;

use crate::core::models::ContentSource;

// Word characters are Unicode-aware, so a link glued to surrounding CJK text
// keeps those characters. Spaces, quotes and angle brackets end the match.
static URL_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"https?://[\w/:%#$&?()~.=+\-]+")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// Returns the first HTTP(S) link in the text. Later links are ignored.
#[must_use]
pub fn extract_first_url(text: &str) -> Option<&str> {
    URL_RE.find(text).map(|m| m.as_str())
}

/// Classifies a link as a video (with its identifier) or a web article.
///
/// Only `youtube.com`, `www.youtube.com` and `youtu.be` count as video hosts.
/// A video link without an identifier still classifies as a video, with an
/// empty id, so it fails on the caption path rather than being scraped.
#[must_use]
pub fn classify_source(raw_url: &str) -> ContentSource {
    let web = || ContentSource::WebArticle {
        url: raw_url.to_string(),
    };

    let Ok(url) = Url::parse(raw_url) else {
        return web();
    };

    match url.host_str() {
        Some("youtube.com" | "www.youtube.com") => {
            let video_id = url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            ContentSource::Video { video_id }
        }
        Some("youtu.be") => {
            let video_id = url
                .path_segments()
                .and_then(|mut segments| segments.next())
                .unwrap_or_default()
                .to_string();
            ContentSource::Video { video_id }
        }
        _ => web(),
    }
}
