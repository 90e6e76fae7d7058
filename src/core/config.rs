use std::env;

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL_IDENTIFIER: &str = "models/gemini-flash-lite-latest";

/// Caption languages tried in order when `CAPTION_LANGUAGES` is not set.
pub const DEFAULT_CAPTION_LANGUAGES: [&str; 8] = [
    "ja", "ja-JP", "en", "en-US", "en-GB", "ko", "zh-Hant", "zh-Hans",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub processing_queue_url: String,
    pub line_channel_secret: String,
    pub line_channel_access_token: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub trigger_name: String,
    pub caption_languages: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let trigger_name =
            env::var("TRIGGER_NAME").map_err(|e| format!("TRIGGER_NAME: {}", e))?;
        if trigger_name.is_empty() {
            return Err("TRIGGER_NAME: must not be empty".to_string());
        }

        Ok(Self {
            processing_queue_url: env::var("PROCESSING_QUEUE_URL")
                .map_err(|e| format!("PROCESSING_QUEUE_URL: {}", e))?,
            line_channel_secret: env::var("LINE_CHANNEL_SECRET")
                .map_err(|e| format!("LINE_CHANNEL_SECRET: {}", e))?,
            line_channel_access_token: env::var("LINE_CHANNEL_ACCESS_TOKEN")
                .map_err(|e| format!("LINE_CHANNEL_ACCESS_TOKEN: {}", e))?,
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|e| format!("GEMINI_API_KEY: {}", e))?,
            gemini_model: env::var("GEMINI_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL_IDENTIFIER.to_string()),
            trigger_name,
            caption_languages: env::var("CAPTION_LANGUAGES")
                .ok()
                .map(|raw| parse_language_list(&raw))
                .filter(|langs| !langs.is_empty())
                .unwrap_or_else(default_caption_languages),
        })
    }
}

#[must_use]
pub fn default_caption_languages() -> Vec<String> {
    DEFAULT_CAPTION_LANGUAGES
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Split a comma-separated language list, dropping blanks.
#[must_use]
pub fn parse_language_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
