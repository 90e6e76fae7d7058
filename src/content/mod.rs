//! Content retrieval for classified links.
//!
//! Two adapters sit behind traits so the pipeline can be driven with fakes:
//! [`web::PageExtractor`] for articles and [`transcript::TranscriptSource`] for
//! videos. [`ContentRetriever`] picks the adapter from the [`ContentSource`]
//! and applies each path's failure policy.

pub mod transcript;
pub mod web;

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::models::{ContentSource, RetrievedContent, SourceType};
use transcript::TranscriptSource;
use web::PageExtractor;

pub(crate) const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Outcome of a retrieval attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieval {
    /// Text from either adapter. May still be too short to summarize.
    Content(RetrievedContent),
    /// The video path failed; this takes precedence over the generic
    /// content-unreadable reply.
    CaptionUnavailable,
}

pub struct ContentRetriever {
    pages: Arc<dyn PageExtractor>,
    transcripts: Arc<dyn TranscriptSource>,
    caption_languages: Vec<String>,
}

impl ContentRetriever {
    #[must_use]
    pub fn new(
        pages: Arc<dyn PageExtractor>,
        transcripts: Arc<dyn TranscriptSource>,
        caption_languages: Vec<String>,
    ) -> Self {
        Self {
            pages,
            transcripts,
            caption_languages,
        }
    }

    pub async fn retrieve(&self, source: &ContentSource, correlation_id: &str) -> Retrieval {
        match source {
            ContentSource::Video { video_id } => {
                match self
                    .transcripts
                    .fetch_fragments(video_id, &self.caption_languages)
                    .await
                {
                    Ok(fragments) => {
                        let text = join_fragments(&fragments);
                        info!(
                            corr_id = %correlation_id,
                            video_id = %video_id,
                            fragments = fragments.len(),
                            chars = text.chars().count(),
                            "Fetched video transcript"
                        );
                        Retrieval::Content(RetrievedContent::new(
                            text,
                            SourceType::VideoTranscript,
                        ))
                    }
                    Err(e) => {
                        error!(corr_id = %correlation_id, "YouTube transcript error: {}", e);
                        Retrieval::CaptionUnavailable
                    }
                }
            }
            ContentSource::WebArticle { url } => {
                // Failures collapse to empty text with no signal of their own;
                // the sufficiency check then reports the page as unreadable.
                let text = match self.pages.extract_article(url).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(corr_id = %correlation_id, "Web extraction failed: {}", e);
                        String::new()
                    }
                };
                info!(
                    corr_id = %correlation_id,
                    chars = text.chars().count(),
                    "Extracted web article"
                );
                Retrieval::Content(RetrievedContent::new(text, SourceType::WebArticle))
            }
        }
    }
}

/// Joins caption fragments with single spaces, keeping their order.
#[must_use]
pub fn join_fragments(fragments: &[String]) -> String {
    fragments.join(" ")
}
