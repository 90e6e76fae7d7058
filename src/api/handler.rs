//! API Lambda handler: verifies the webhook, schedules work, acknowledges.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::sqs::TaskQueue;
use super::{event_handler, helpers, parsing, signature};
use crate::core::config::AppConfig;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails at the Lambda level; rejected requests are returned as 400
/// responses.
#[tracing::instrument(level = "info", skip_all)]
pub async fn function_handler(
    config: &AppConfig,
    queue: &dyn TaskQueue,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_request(config, queue, &event.payload).await)
}

pub use self::function_handler as handler;

/// Handles one API Gateway proxy request.
///
/// The response is returned once tasks are queued; summarizing happens in the
/// Worker afterwards.
pub async fn handle_request(config: &AppConfig, queue: &dyn TaskQueue, payload: &Value) -> Value {
    let body = match parsing::extract_body(payload) {
        Ok(b) => b,
        Err(e) => {
            error!("Request body error: {}", e);
            return helpers::err_response(400, "Missing body");
        }
    };

    let sig = payload
        .get("headers")
        .and_then(|h| parsing::get_header_value(h, SIGNATURE_HEADER))
        .unwrap_or("");

    if !signature::verify_line_signature(&body, sig, &config.line_channel_secret) {
        return helpers::err_response(400, "Invalid signature");
    }

    let messages = match parsing::parse_webhook_events(&body) {
        Ok(m) => m,
        Err(e) => {
            error!("Webhook payload parse error: {}", e);
            return helpers::err_response(400, "Invalid payload");
        }
    };

    let scheduled = event_handler::schedule_messages(queue, &config.trigger_name, messages).await;
    info!(scheduled, "Webhook handled");

    helpers::ok_ack()
}
