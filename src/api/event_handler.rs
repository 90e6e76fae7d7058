//! Turns webhook messages into queued tasks.
//!
//! A message is scheduled only when it mentions the bot by name and carries a
//! link. Everything else is dropped without a reply.

use tracing::{debug, error, info};
use uuid::Uuid;

use super::sqs::TaskQueue;
use crate::core::models::{IncomingMessage, ProcessingTask};
use crate::utils::filters::filter_triggered_messages;
use crate::utils::links::extract_first_url;

/// Builds the task for a message, or `None` when it has no link.
#[must_use]
pub fn build_task(message: &IncomingMessage) -> Option<ProcessingTask> {
    let url = extract_first_url(&message.text)?;
    Some(ProcessingTask {
        correlation_id: Uuid::new_v4().to_string(),
        reply_token: message.reply_token.clone(),
        url: url.to_string(),
    })
}

/// Enqueues one task per triggered message with a link and returns how many
/// were queued. Enqueue failures are logged and not retried.
pub async fn schedule_messages(
    queue: &dyn TaskQueue,
    trigger_name: &str,
    messages: Vec<IncomingMessage>,
) -> usize {
    let received = messages.len();
    let triggered = filter_triggered_messages(messages, trigger_name);
    debug!(received, triggered = triggered.len(), "Applied trigger gate");

    let mut scheduled = 0;
    for message in &triggered {
        let Some(task) = build_task(message) else {
            info!("Bot was mentioned without a link; ignoring");
            continue;
        };

        match queue.enqueue(&task).await {
            Ok(()) => {
                info!(corr_id = %task.correlation_id, "Queued summary task");
                scheduled += 1;
            }
            Err(e) => error!(corr_id = %task.correlation_id, "enqueue failed: {}", e),
        }
    }

    scheduled
}
