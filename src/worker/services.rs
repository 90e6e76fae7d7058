use std::sync::Arc;

use crate::ai::{GeminiClient, TextModel};
use crate::content::ContentRetriever;
use crate::content::transcript::{TranscriptSource, YouTubeTranscriptClient};
use crate::content::web::{HttpPageExtractor, PageExtractor};
use crate::core::config::AppConfig;
use crate::errors::BotError;
use crate::line::{LineClient, ReplySender};

use super::summarize::SummaryPipeline;

/// Clients the Worker needs, built once per cold start and shared read-only by
/// every task.
pub struct WorkerServices {
    pub pipeline: SummaryPipeline,
    pub replies: Arc<dyn ReplySender>,
}

impl WorkerServices {
    #[must_use]
    pub fn new(
        pages: Arc<dyn PageExtractor>,
        transcripts: Arc<dyn TranscriptSource>,
        model: Arc<dyn TextModel>,
        replies: Arc<dyn ReplySender>,
        caption_languages: Vec<String>,
    ) -> Self {
        let retriever = ContentRetriever::new(pages, transcripts, caption_languages);
        Self {
            pipeline: SummaryPipeline::new(retriever, model),
            replies,
        }
    }

    /// # Errors
    ///
    /// Returns an error if one of the HTTP clients cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        let transcripts = YouTubeTranscriptClient::new()
            .map_err(|e| BotError::HttpError(format!("Failed to build transcript client: {e}")))?;
        Ok(Self::new(
            Arc::new(HttpPageExtractor::new()?),
            Arc::new(transcripts),
            Arc::new(GeminiClient::new(
                config.gemini_api_key.clone(),
                &config.gemini_model,
            )),
            Arc::new(LineClient::new(config.line_channel_access_token.clone())?),
            config.caption_languages.clone(),
        ))
    }
}
