use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Failed to parse webhook payload: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to access LINE Messaging API: {0}")]
    LineApiError(String),

    #[error("Failed to access Gemini API: {0}")]
    ModelError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

// Generic implementation for AWS SDK errors
impl<E> From<aws_sdk_sqs::error::SdkError<E>> for BotError
where
    aws_sdk_sqs::error::SdkError<E>: std::fmt::Display,
{
    fn from(error: aws_sdk_sqs::error::SdkError<E>) -> Self {
        BotError::AwsError(error.to_string())
    }
}
