//! AI client configuration.

use std::time::Duration;

/// Default OpenAI base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini-2025-04-14";

/// Default upper bound on a single extraction call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    /// Model name (e.g., "gpt-4.1-mini-2025-04-14").
    pub model: String,
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    pub timeout: Duration,
}

impl AiConfig {
    /// Configuration with the given key and defaults for everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
