use tracing::{error, info};

use crate::core::models::{DeliveryOutcome, ProcessingTask};
use crate::line::ReplySender;

/// Sends the reply through the task's one-time reply token.
///
/// A failed send is logged and not retried: the token is either spent or
/// expired, so there is no other channel left to use.
pub async fn deliver_reply(
    replies: &dyn ReplySender,
    task: &ProcessingTask,
    text: &str,
) -> DeliveryOutcome {
    match replies.reply(&task.reply_token, text).await {
        Ok(()) => {
            info!(corr_id = %task.correlation_id, "Reply delivered");
            DeliveryOutcome::Delivered
        }
        Err(e) => {
            error!(corr_id = %task.correlation_id, "Failed to send message: {}", e);
            DeliveryOutcome::Failed
        }
    }
}
