//! In-memory stand-ins for the external services.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use linksum::BotError;
use linksum::ai::TextModel;
use linksum::api::TaskQueue;
use linksum::content::transcript::{TranscriptError, TranscriptSource};
use linksum::content::web::PageExtractor;
use linksum::core::config::{AppConfig, default_caption_languages};
use linksum::core::models::ProcessingTask;
use linksum::line::ReplySender;
use linksum::worker::WorkerServices;

pub const TRIGGER: &str = "ひでまろ";
pub const SECRET: &str = "channel-secret";

#[derive(Default)]
pub struct FakePages {
    pub text: Option<String>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl PageExtractor for FakePages {
    async fn extract_article(&self, _url: &str) -> Result<String, BotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text
            .clone()
            .ok_or_else(|| BotError::HttpError("connection refused".into()))
    }
}

/// Serves fragments for one language only.
pub struct FakeTranscripts {
    pub language: String,
    pub fragments: Vec<String>,
    pub calls: AtomicUsize,
    pub seen_languages: Mutex<Vec<String>>,
}

impl FakeTranscripts {
    pub fn new(language: &str, fragments: &[&str]) -> Self {
        Self {
            language: language.to_string(),
            fragments: fragments.iter().map(|s| (*s).to_string()).collect(),
            calls: AtomicUsize::new(0),
            seen_languages: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn fetch_fragments(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<Vec<String>, TranscriptError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_languages.lock().unwrap() = languages.to_vec();
        if video_id.is_empty() {
            return Err(TranscriptError::MissingVideoId);
        }
        if languages.iter().any(|l| *l == self.language) && !self.fragments.is_empty() {
            Ok(self.fragments.clone())
        } else {
            Err(TranscriptError::NoTrackInLanguages {
                video_id: video_id.to_string(),
                languages: languages.to_vec(),
            })
        }
    }
}

pub struct FakeModel {
    pub response: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn answering(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            response: Err(reason.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextModel for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone().map_err(BotError::ModelError)
    }
}

#[derive(Default)]
pub struct FakeReplies {
    pub fail: bool,
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ReplySender for FakeReplies {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), BotError> {
        if self.fail {
            return Err(BotError::LineApiError(
                "reply failed: status=400 body={\"message\":\"Invalid reply token\"}".into(),
            ));
        }
        self.sent
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingQueue {
    pub fail: bool,
    pub tasks: Mutex<Vec<ProcessingTask>>,
}

#[async_trait]
impl TaskQueue for RecordingQueue {
    async fn enqueue(&self, task: &ProcessingTask) -> Result<(), BotError> {
        if self.fail {
            return Err(BotError::AwsError("queue unavailable".into()));
        }
        self.tasks.lock().unwrap().push(task.clone());
        Ok(())
    }
}

pub struct Harness {
    pub pages: Arc<FakePages>,
    pub transcripts: Arc<FakeTranscripts>,
    pub model: Arc<FakeModel>,
    pub replies: Arc<FakeReplies>,
    pub services: WorkerServices,
}

impl Harness {
    pub fn new(
        pages: FakePages,
        transcripts: FakeTranscripts,
        model: FakeModel,
        replies: FakeReplies,
    ) -> Self {
        let pages = Arc::new(pages);
        let transcripts = Arc::new(transcripts);
        let model = Arc::new(model);
        let replies = Arc::new(replies);
        let services = WorkerServices::new(
            pages.clone(),
            transcripts.clone(),
            model.clone(),
            replies.clone(),
            default_caption_languages(),
        );
        Self {
            pages,
            transcripts,
            model,
            replies,
            services,
        }
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        processing_queue_url: "https://sqs.example/queue".into(),
        line_channel_secret: SECRET.into(),
        line_channel_access_token: "token".into(),
        gemini_api_key: "key".into(),
        gemini_model: "models/gemini-flash-lite-latest".into(),
        trigger_name: TRIGGER.into(),
        caption_languages: default_caption_languages(),
    }
}
