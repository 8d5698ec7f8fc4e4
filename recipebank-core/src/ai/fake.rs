//! Fake AI client for testing.
//!
//! Returns deterministic responses based on prompt matching, allowing tests to run
//! without network access or API costs.

use async_trait::async_trait;
use std::sync::Mutex;

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse, Usage};

/// A fake AI client for testing.
///
/// Responses are matched by checking if any message contains a registered substring
/// (case-insensitive). If no match is found, returns the default response or an error.
/// Every request is recorded and can be inspected with [`FakeAiClient::requests`].
#[derive(Debug, Default)]
pub struct FakeAiClient {
    responses: Vec<(String, String)>,
    default_response: Option<String>,
    failure: Option<String>,
    requests: Mutex<Vec<(String, ChatRequest)>>,
}

impl FakeAiClient {
    /// Create a new FakeAiClient with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client that answers every request with `response`.
    pub fn with_default_response(response: &str) -> Self {
        Self {
            default_response: Some(response.to_string()),
            ..Self::default()
        }
    }

    /// Create a client whose every call fails with [`AiError::Api`].
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), response.to_string()));
        self
    }

    /// Requests received so far, with the prompt name they were sent under.
    pub fn requests(&self) -> Vec<(String, ChatRequest)> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let prompt_lower = request
            .messages
            .iter()
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");

        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((prompt_name.to_string(), request));

        if let Some(message) = &self.failure {
            return Err(AiError::Api(message.clone()));
        }

        let content = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern))
            .map(|(_, response)| response.clone())
            .or_else(|| self.default_response.clone())
            .ok_or_else(|| {
                AiError::Api(format!(
                    "FakeAiClient: No response configured for prompt {}",
                    prompt_name
                ))
            })?;

        Ok(ChatResponse {
            content,
            usage: Usage::default(),
        })
    }
}
