use serde::{Deserialize, Serialize};

/// A text message received through the webhook. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub text: String,
    /// Single-use and time-limited; the platform rejects it once expired.
    pub reply_token: String,
}

/// One deferred unit of work handed from the API function to the Worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingTask {
    pub correlation_id: String,
    pub reply_token: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    WebArticle,
    VideoTranscript,
}

impl SourceType {
    /// Label used in the prompt and in the content-unreadable reply.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SourceType::WebArticle => "web article",
            SourceType::VideoTranscript => "video",
        }
    }
}

/// A classified URL. Video sources carry their identifier, which may be empty
/// when the URL is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    WebArticle { url: String },
    Video { video_id: String },
}

impl ContentSource {
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        match self {
            ContentSource::WebArticle { .. } => SourceType::WebArticle,
            ContentSource::Video { .. } => SourceType::VideoTranscript,
        }
    }
}

/// Minimum number of characters for retrieved content to be usable.
pub const MIN_CONTENT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedContent {
    pub text: String,
    pub source_type: SourceType,
}

impl RetrievedContent {
    #[must_use]
    pub fn new(text: String, source_type: SourceType) -> Self {
        Self { text, source_type }
    }

    /// Content shorter than [`MIN_CONTENT_CHARS`] counts as a retrieval failure.
    #[must_use]
    pub fn is_sufficient(&self) -> bool {
        self.text.chars().count() >= MIN_CONTENT_CHARS
    }
}

/// Text sent back to the conversation: either the model's answer or one of the
/// fixed failure replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResult {
    Summary(String),
    CaptionUnavailable,
    ContentUnreadable(SourceType),
    SummarizationFailed,
}

impl SummaryResult {
    #[must_use]
    pub fn into_reply_text(self) -> String {
        match self {
            SummaryResult::Summary(text) => text,
            SummaryResult::CaptionUnavailable => CAPTION_UNAVAILABLE_MESSAGE.to_string(),
            SummaryResult::ContentUnreadable(source_type) => {
                content_unreadable_message(source_type)
            }
            SummaryResult::SummarizationFailed => SUMMARIZATION_FAILED_MESSAGE.to_string(),
        }
    }
}

pub const CAPTION_UNAVAILABLE_MESSAGE: &str = "Could not get captions for this video. Captions may be turned off, or the video may be too long.";

pub const SUMMARIZATION_FAILED_MESSAGE: &str = "An error occurred while generating the summary.";

#[must_use]
pub fn content_unreadable_message(source_type: SourceType) -> String {
    format!("{} content could not be read", source_type.label())
}

/// Result of handing the reply text to the platform. Failure is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed,
}
