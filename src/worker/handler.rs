use futures::future::join_all;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::deliver;
use super::services::WorkerServices;
use crate::core::models::{DeliveryOutcome, ProcessingTask};

/// Lambda handler for the Worker entrypoint. Runs every queued task in the
/// batch concurrently and replies to each.
///
/// The invocation succeeds even when individual tasks fail so that SQS never
/// redelivers a task: each one runs exactly once to a terminal outcome.
pub async fn function_handler(
    services: &WorkerServices,
    event: LambdaEvent<Value>,
) -> Result<(), Error> {
    let tasks = parse_sqs_tasks(&event.payload);
    info!(tasks = tasks.len(), "Worker Lambda received SQS batch");

    let outcomes = join_all(tasks.iter().map(|task| process_task(services, task))).await;
    let failed = outcomes
        .iter()
        .filter(|o| **o == DeliveryOutcome::Failed)
        .count();
    info!(
        delivered = outcomes.len() - failed,
        failed, "Worker batch finished"
    );

    Ok(())
}

pub use self::function_handler as handler;

/// One deferred unit of work: summarize the link, then reply with the result
/// or the fixed failure text.
pub async fn process_task(services: &WorkerServices, task: &ProcessingTask) -> DeliveryOutcome {
    info!(corr_id = %task.correlation_id, "Processing task");
    let result = services
        .pipeline
        .summarize_url(&task.url, &task.correlation_id)
        .await;
    let text = result.into_reply_text();
    deliver::deliver_reply(services.replies.as_ref(), task, &text).await
}

/// Extracts tasks from an SQS event. Records that cannot be parsed are logged
/// and skipped.
#[must_use]
pub fn parse_sqs_tasks(payload: &Value) -> Vec<ProcessingTask> {
    let Some(records) = payload.get("Records").and_then(|r| r.as_array()) else {
        error!("SQS event has no Records array");
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| {
            let Some(body) = record.get("body").and_then(|b| b.as_str()) else {
                error!("SQS record has no body");
                return None;
            };
            serde_json::from_str::<ProcessingTask>(body)
                .map_err(|e| {
                    error!("Failed to parse SQS message body into ProcessingTask: {}", e);
                })
                .ok()
        })
        .collect()
}
