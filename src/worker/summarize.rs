use std::sync::Arc;
use tracing::{error, info};

use crate::ai::TextModel;
use crate::content::{ContentRetriever, Retrieval};
use crate::core::models::{RetrievedContent, SummaryResult};
use crate::prompt::build_summary_prompt;
use crate::utils::links::classify_source;

/// Classify, retrieve, check and summarize one link.
pub struct SummaryPipeline {
    retriever: ContentRetriever,
    model: Arc<dyn TextModel>,
}

impl SummaryPipeline {
    #[must_use]
    pub fn new(retriever: ContentRetriever, model: Arc<dyn TextModel>) -> Self {
        Self { retriever, model }
    }

    /// Always resolves to reply text; failures become one of the fixed replies.
    pub async fn summarize_url(&self, url: &str, correlation_id: &str) -> SummaryResult {
        let source = classify_source(url);
        info!(
            corr_id = %correlation_id,
            source_type = source.source_type().label(),
            "Classified link"
        );

        let content = match self.retriever.retrieve(&source, correlation_id).await {
            Retrieval::CaptionUnavailable => return SummaryResult::CaptionUnavailable,
            Retrieval::Content(content) => content,
        };

        if !content.is_sufficient() {
            info!(
                corr_id = %correlation_id,
                chars = content.text.chars().count(),
                "Retrieved content too short to summarize"
            );
            return SummaryResult::ContentUnreadable(content.source_type);
        }

        summarize_content(self.model.as_ref(), &content, correlation_id).await
    }
}

/// Invokes the model once with the summary prompt. The answer is passed on
/// as-is; its shape is not checked.
pub async fn summarize_content(
    model: &dyn TextModel,
    content: &RetrievedContent,
    correlation_id: &str,
) -> SummaryResult {
    let prompt = build_summary_prompt(content);
    match model.generate(&prompt).await {
        Ok(text) => SummaryResult::Summary(text),
        Err(e) => {
            error!(corr_id = %correlation_id, "Gemini error: {}", e);
            SummaryResult::SummarizationFailed
        }
    }
}
