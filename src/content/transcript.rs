//! Video transcript adapter: resolves a caption track for a YouTube video and
//! returns its fragments in playback order.

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::BROWSER_USER_AGENT;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Why no transcript could be produced. Every variant surfaces to the user as
/// the same caption-unavailable reply; the distinction is for logs.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("video URL has no video id")]
    MissingVideoId,

    #[error("failed to fetch video data: {0}")]
    Fetch(String),

    #[error("captions are disabled for video {0}")]
    CaptionsDisabled(String),

    #[error("no caption track for video {video_id} in languages {languages:?}")]
    NoTrackInLanguages {
        video_id: String,
        languages: Vec<String>,
    },

    #[error("failed to parse captions: {0}")]
    Parse(String),

    #[error("caption track for video {0} has no text")]
    Empty(String),
}

impl From<reqwest::Error> for TranscriptError {
    fn from(error: reqwest::Error) -> Self {
        TranscriptError::Fetch(error.to_string())
    }
}

/// Caption retrieval collaborator.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Returns the caption fragments of the first available track matching
    /// `languages`, in temporal order.
    async fn fetch_fragments(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<Vec<String>, TranscriptError>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `"asr"` for auto-generated tracks, absent for uploaded ones.
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionsJson {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

pub struct YouTubeTranscriptClient {
    http: Client,
}

impl YouTubeTranscriptClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, TranscriptError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self { http })
    }

    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, TranscriptError> {
        let response = self
            .http
            .get(format!("{WATCH_URL}{video_id}"))
            .header("Accept-Language", "en-US")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptError::Fetch(format!(
                "watch page returned status {status}"
            )));
        }
        let html = response.text().await?;
        parse_caption_tracks(&html, video_id)
    }
}

#[async_trait]
impl TranscriptSource for YouTubeTranscriptClient {
    async fn fetch_fragments(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<Vec<String>, TranscriptError> {
        if video_id.is_empty() {
            return Err(TranscriptError::MissingVideoId);
        }

        let tracks = self.list_tracks(video_id).await?;
        let track = select_track(&tracks, languages).ok_or_else(|| {
            TranscriptError::NoTrackInLanguages {
                video_id: video_id.to_string(),
                languages: languages.to_vec(),
            }
        })?;
        debug!(
            video_id,
            language = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        // srv3 is a different XML dialect; the default format is <text> elements
        let url = track.base_url.replace("&fmt=srv3", "");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptError::Fetch(format!(
                "caption download returned status {status}"
            )));
        }
        let xml = response.text().await?;

        let fragments = parse_caption_xml(&xml)?;
        if fragments.is_empty() {
            return Err(TranscriptError::Empty(video_id.to_string()));
        }
        Ok(fragments)
    }
}

/// Pulls the caption track list out of a watch page.
///
/// # Errors
///
/// Returns `CaptionsDisabled` when the page carries no caption metadata and
/// `Parse` when the metadata is malformed.
pub fn parse_caption_tracks(
    html: &str,
    video_id: &str,
) -> Result<Vec<CaptionTrack>, TranscriptError> {
    let Some((_, after)) = html.split_once("\"captions\":") else {
        return Err(TranscriptError::CaptionsDisabled(video_id.to_string()));
    };
    let json = after
        .split_once(",\"videoDetails")
        .map_or(after, |(captions, _)| captions);

    let captions: CaptionsJson = serde_json::from_str(json)
        .map_err(|e| TranscriptError::Parse(format!("caption metadata: {e}")))?;

    let tracks = captions
        .player_captions_tracklist_renderer
        .map(|r| r.caption_tracks)
        .unwrap_or_default();
    if tracks.is_empty() {
        return Err(TranscriptError::CaptionsDisabled(video_id.to_string()));
    }
    Ok(tracks)
}

/// Picks the first track matching the preference list. Within one language an
/// uploaded track wins over an auto-generated one.
#[must_use]
pub fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|lang| {
        let mut matching = tracks.iter().filter(|t| &t.language_code == lang);
        let manual = matching.clone().find(|t| !t.is_generated());
        manual.or_else(|| matching.next())
    })
}

static TAG_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"<[^>]*>").unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// Parses a timedtext XML document into cleaned fragments, in document order.
///
/// # Errors
///
/// Returns `Parse` if the XML is malformed.
pub fn parse_caption_xml(xml: &str) -> Result<Vec<String>, TranscriptError> {
    let mut reader = Reader::from_str(xml);
    let mut fragments = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"text" => {
                current = Some(String::new());
            }
            Ok(Event::Text(t)) => {
                if let Some(buf) = current.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| TranscriptError::Parse(e.to_string()))?;
                    buf.push_str(&text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"text" => {
                if let Some(raw) = current.take() {
                    let cleaned = clean_fragment(&raw);
                    if !cleaned.is_empty() {
                        fragments.push(cleaned);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TranscriptError::Parse(e.to_string())),
            _ => {}
        }
    }

    Ok(fragments)
}

/// Captions are often double-escaped and may carry inline formatting tags.
fn clean_fragment(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    let stripped = TAG_RE.replace_all(&decoded, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(lang: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://example.com/{lang}"),
            language_code: lang.to_string(),
            kind: kind.map(ToString::to_string),
        }
    }

    fn langs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn selects_by_language_preference_order() {
        let tracks = vec![track("en", None), track("ja", Some("asr"))];
        let picked = select_track(&tracks, &langs(&["ja", "en"])).unwrap();
        assert_eq!(picked.language_code, "ja");
    }

    #[test]
    fn manual_track_beats_generated_within_language() {
        let tracks = vec![track("en", Some("asr")), track("en", None)];
        let picked = select_track(&tracks, &langs(&["en"])).unwrap();
        assert!(!picked.is_generated());
    }

    #[test]
    fn no_track_in_preferred_languages() {
        let tracks = vec![track("de", None)];
        assert!(select_track(&tracks, &langs(&["ja", "en"])).is_none());
    }

    #[test]
    fn parses_fragments_in_order_and_decodes_entities() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript>
            <text start="0.0" dur="1.5">Hello &amp;amp; welcome</text>
            <text start="1.5" dur="2.0">it&amp;#39;s   <font color="red">great</font></text>
            <text start="3.5" dur="1.0"></text>
            <text start="4.5" dur="1.0">bye</text>
        </transcript>"#;
        let fragments = parse_caption_xml(xml).unwrap();
        assert_eq!(fragments, vec!["Hello & welcome", "it's great", "bye"]);
    }

    #[test]
    fn malformed_xml_is_parse_error() {
        let err = parse_caption_xml("<transcript><text>oops</transcript>").unwrap_err();
        assert!(matches!(err, TranscriptError::Parse(_)));
    }

    #[test]
    fn extracts_tracks_from_watch_page() {
        let html = r#"<script>var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=xyz&lang=ja","languageCode":"ja","kind":"asr"}]}},"videoDetails":{"videoId":"xyz"}};</script>"#;
        let tracks = parse_caption_tracks(html, "xyz").unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].language_code, "ja");
        assert!(tracks[0].is_generated());
    }

    #[test]
    fn page_without_captions_is_disabled() {
        let err = parse_caption_tracks("<html>no captions</html>", "xyz").unwrap_err();
        assert!(matches!(err, TranscriptError::CaptionsDisabled(id) if id == "xyz"));
    }
}
