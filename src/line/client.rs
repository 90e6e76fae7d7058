//! LINE Messaging API client module

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::response_builder::create_reply_payload;
use crate::errors::BotError;

const REPLY_ENDPOINT: &str = "https://api.line.me/v2/bot/message/reply";

/// Sends one reply through a message's reply token.
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the platform rejects the reply, including when the
    /// token has already expired or been used.
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), BotError>;
}

pub struct LineClient {
    http: Client,
    access_token: String,
}

impl LineClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(access_token: String) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BotError::HttpError(format!("Failed to build LINE client: {e}")))?;
        Ok(Self { http, access_token })
    }
}

#[async_trait]
impl ReplySender for LineClient {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), BotError> {
        let body = create_reply_payload(reply_token, text);
        let resp = self
            .http
            .post(REPLY_ENDPOINT)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(BotError::LineApiError(format!(
                "reply failed: status={status} body={body_text}"
            )));
        }
        Ok(())
    }
}
