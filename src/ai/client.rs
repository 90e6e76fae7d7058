//! Gemini API client module
//!
//! Encapsulates the generative-model call used to write summaries.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::errors::BotError;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A generative text model: prompt in, raw response text out.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the call fails or the response carries no text.
    async fn generate(&self, prompt: &str) -> Result<String, BotError>;
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model_name: String,
}

impl GeminiClient {
    #[must_use]
    pub fn new(api_key: String, model_name: &str) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model_name: normalize_model_name(model_name),
        }
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        #[cfg(feature = "debug-logs")]
        info!("Using Gemini prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            prompt_chars = prompt.chars().count(),
            "Generating summary"
        );

        let request_body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ]
        });

        let response = self
            .http
            .post(format!(
                "{GEMINI_API_BASE}/{}:generateContent",
                self.model_name
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| BotError::HttpError(format!("Gemini API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(BotError::ModelError(format!(
                "Gemini API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| BotError::ModelError(format!("Failed to parse Gemini response: {e}")))?;

        extract_response_text(&response_json)
    }
}

/// Accepts `gemini-x` as well as `models/gemini-x`.
#[must_use]
pub fn normalize_model_name(model: &str) -> String {
    let model = model.trim();
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

/// Concatenates the text parts of the first candidate.
///
/// # Errors
///
/// Returns an error when the response has no text, for example when the
/// prompt was blocked.
pub fn extract_response_text(response_json: &Value) -> Result<String, BotError> {
    let parts = response_json
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());

    let text = parts
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default();

    if !text.is_empty() {
        return Ok(text);
    }

    let block_reason = response_json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str());
    let finish_reason = response_json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("finishReason"))
        .and_then(|r| r.as_str());
    debug!(?block_reason, ?finish_reason, "Gemini response without text");

    Err(BotError::ModelError(match (block_reason, finish_reason) {
        (Some(reason), _) => format!("Prompt blocked: {reason}"),
        (None, Some(reason)) => format!("No text in response (finish reason {reason})"),
        (None, None) => "No text in response".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_name_gets_prefix_once() {
        assert_eq!(normalize_model_name("gemini-2.0-flash"), "models/gemini-2.0-flash");
        assert_eq!(
            normalize_model_name("models/gemini-flash-lite-latest"),
            "models/gemini-flash-lite-latest"
        );
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let v = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Title: A\n" }, { "text": "・one" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        assert_eq!(extract_response_text(&v).unwrap(), "Title: A\n・one");
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let v = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = extract_response_text(&v).unwrap_err();
        assert!(err.to_string().contains("Prompt blocked: SAFETY"));
    }

    #[test]
    fn candidate_without_parts_is_an_error() {
        let v = json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] });
        let err = extract_response_text(&v).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }
}
