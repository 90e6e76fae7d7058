//! linksum - a LINE chat bot that summarizes shared links with Gemini.
//!
//! When a group message mentions the bot by name and contains a link, the bot
//! reads the linked web article or YouTube transcript, asks Gemini for a short
//! structured summary and replies in the same conversation.
//!
//! # Architecture
//!
//! The system uses two Lambdas:
//! 1. An API Lambda that verifies LINE webhooks, gates messages on the trigger
//!    name and a link, and queues one task per message on SQS
//! 2. A Worker Lambda that retrieves the content, summarizes it and replies
//!    through the message's one-time reply token
//!
//! External services sit behind traits (`PageExtractor`, `TranscriptSource`,
//! `TextModel`, `ReplySender`, `TaskQueue`) whose production clients are
//! built once per cold start.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use linksum::ai::GeminiClient;
//! use linksum::content::transcript::YouTubeTranscriptClient;
//! use linksum::content::web::HttpPageExtractor;
//! use linksum::core::config::default_caption_languages;
//! use linksum::core::models::ProcessingTask;
//! use linksum::line::LineClient;
//! use linksum::worker::{WorkerServices, process_task};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     linksum::setup_logging();
//!
//!     let services = WorkerServices::new(
//!         Arc::new(HttpPageExtractor::new()?),
//!         Arc::new(YouTubeTranscriptClient::new()?),
//!         Arc::new(GeminiClient::new("dummy_key".into(), "gemini-flash-lite-latest")),
//!         Arc::new(LineClient::new("dummy_token".into())?),
//!         default_caption_languages(),
//!     );
//!
//!     let task = ProcessingTask {
//!         correlation_id: "demo".into(),
//!         reply_token: "reply-token".into(),
//!         url: "https://youtu.be/dQw4w9WgXcQ".into(),
//!     };
//!     let outcome = process_task(&services, &task).await;
//!     println!("Delivery outcome: {outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod api;
pub mod content;
pub mod core;
pub mod errors;
pub mod line;
pub mod prompt;
pub mod utils;
pub mod worker;

pub use errors::BotError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. The level comes from `RUST_LOG` and defaults to `info`. Calling it
/// more than once is harmless.
///
/// # Example
///
/// ```
/// linksum::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
