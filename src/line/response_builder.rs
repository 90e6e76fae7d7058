//! Payload builders for LINE Messaging API calls.

use serde_json::{Value, json};

use crate::prompt::truncate_chars;

/// Maximum length of a LINE text message.
pub const MAX_TEXT_MESSAGE_CHARS: usize = 5_000;

/// Create the body of a reply call carrying one text message.
///
/// Text longer than [`MAX_TEXT_MESSAGE_CHARS`] is cut so the platform accepts it.
///
/// # Examples
///
/// ```
/// use linksum::line::response_builder::create_reply_payload;
///
/// let payload = create_reply_payload("token-123", "hello");
/// assert_eq!(payload["messages"][0]["text"], "hello");
/// ```
#[must_use]
pub fn create_reply_payload(reply_token: &str, text: &str) -> Value {
    json!({
        "replyToken": reply_token,
        "messages": [
            { "type": "text", "text": truncate_chars(text, MAX_TEXT_MESSAGE_CHARS) }
        ]
    })
}
