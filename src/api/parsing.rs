use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::Value;

use crate::core::models::IncomingMessage;
use crate::errors::BotError;

#[derive(Debug, Deserialize)]
struct WebhookPayload {
    #[serde(default)]
    events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WebhookEvent {
    Message {
        // Absent for events delivered while the channel is in standby mode
        #[serde(rename = "replyToken", default)]
        reply_token: Option<String>,
        message: MessageContent,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum MessageContent {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Parses a webhook body into the text messages it carries. Other event and
/// message types are dropped.
///
/// # Errors
///
/// Returns an error if the body is not a webhook JSON document.
pub fn parse_webhook_events(body: &[u8]) -> Result<Vec<IncomingMessage>, BotError> {
    let payload: WebhookPayload = serde_json::from_slice(body)
        .map_err(|e| BotError::ParseError(format!("Invalid webhook JSON: {e}")))?;

    Ok(payload
        .events
        .into_iter()
        .filter_map(|event| match event {
            WebhookEvent::Message {
                reply_token: Some(reply_token),
                message: MessageContent::Text { text },
            } => Some(IncomingMessage { text, reply_token }),
            _ => None,
        })
        .collect())
}

/// Returns the raw request body, decoding it when API Gateway delivered it as
/// base64. The signature is computed over these exact bytes.
///
/// # Errors
///
/// Returns an error if the body is missing, not a string, or not valid base64.
pub fn extract_body(payload: &Value) -> Result<Vec<u8>, BotError> {
    let body = payload
        .get("body")
        .and_then(|b| b.as_str())
        .ok_or_else(|| BotError::ParseError("Missing body".to_string()))?;

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if is_base64 {
        STANDARD
            .decode(body)
            .map_err(|e| BotError::ParseError(format!("Invalid base64 body: {e}")))
    } else {
        Ok(body.as_bytes().to_vec())
    }
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_only_text_message_events() {
        let body = json!({
            "destination": "Uabc",
            "events": [
                { "type": "message", "replyToken": "r1", "mode": "active",
                  "message": { "type": "text", "id": "1", "text": "Butler https://a.example" } },
                { "type": "message", "replyToken": "r2",
                  "message": { "type": "sticker", "id": "2", "packageId": "1", "stickerId": "1" } },
                { "type": "follow", "replyToken": "r3" },
                { "type": "message", "mode": "standby",
                  "message": { "type": "text", "id": "4", "text": "no token" } }
            ]
        })
        .to_string();

        let messages = parse_webhook_events(body.as_bytes()).unwrap();
        assert_eq!(
            messages,
            vec![IncomingMessage {
                text: "Butler https://a.example".into(),
                reply_token: "r1".into(),
            }]
        );
    }

    #[test]
    fn empty_events_is_valid() {
        assert!(parse_webhook_events(br#"{"destination":"U","events":[]}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn rejects_non_json() {
        assert!(parse_webhook_events(b"payload=abc").is_err());
    }

    #[test]
    fn decodes_base64_body() {
        let payload = json!({ "body": STANDARD.encode("{\"events\":[]}"), "isBase64Encoded": true });
        assert_eq!(extract_body(&payload).unwrap(), b"{\"events\":[]}".to_vec());

        let plain = json!({ "body": "raw", "isBase64Encoded": false });
        assert_eq!(extract_body(&plain).unwrap(), b"raw".to_vec());

        assert!(extract_body(&json!({})).is_err());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let headers = json!({ "X-Line-Signature": "abc" });
        assert_eq!(get_header_value(&headers, "x-line-signature"), Some("abc"));
        assert_eq!(get_header_value(&headers, "missing"), None);
    }
}
