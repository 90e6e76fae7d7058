use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;

use crate::core::models::ProcessingTask;
use crate::errors::BotError;

/// Hands tasks to the Worker.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if serialization fails or the task cannot be queued.
    async fn enqueue(&self, task: &ProcessingTask) -> Result<(), BotError>;
}

pub struct SqsTaskQueue {
    client: SqsClient,
    queue_url: String,
}

impl SqsTaskQueue {
    pub async fn from_env(queue_url: String) -> Self {
        let shared_config = aws_config::load_from_env().await;
        Self {
            client: SqsClient::new(&shared_config),
            queue_url,
        }
    }
}

#[async_trait]
impl TaskQueue for SqsTaskQueue {
    async fn enqueue(&self, task: &ProcessingTask) -> Result<(), BotError> {
        let message_body = serde_json::to_string(task)
            .map_err(|e| BotError::ParseError(format!("Failed to serialize task: {e}")))?;

        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(message_body)
            .send()
            .await?;
        Ok(())
    }
}
