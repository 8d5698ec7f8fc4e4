//! AI client implementation for OpenAI-compatible chat completion APIs.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage,
        ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs,
        ImageDetail, ImageUrlArgs, ResponseFormat as OpenAiResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use super::config::AiConfig;
use super::types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat, Role, Usage};

#[derive(Error, Debug)]
pub enum AiError {
    #[error("API error: {0}")]
    Api(String),

    #[error("AI request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Trait for AI clients.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Complete a chat request.
    ///
    /// `prompt_name` identifies the prompt in logs.
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError>;
}

/// Client for OpenAI or any API that speaks its chat completion protocol.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::Config("API key is empty".to_string()));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
        })
    }

    /// Convert our ChatMessage to async-openai's format.
    fn to_openai_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, AiError> {
        match msg.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Api(format!("Failed to build system message: {}", e))),
            Role::User => {
                let content = if msg.images.is_empty() {
                    ChatCompletionRequestUserMessageContent::Text(msg.content.clone())
                } else {
                    ChatCompletionRequestUserMessageContent::Array(Self::user_parts(msg)?)
                };
                ChatCompletionRequestUserMessageArgs::default()
                    .content(content)
                    .build()
                    .map(Into::into)
                    .map_err(|e| AiError::Api(format!("Failed to build user message: {}", e)))
            }
        }
    }

    /// Text first, then each image inline as a data URI.
    fn user_parts(
        msg: &ChatMessage,
    ) -> Result<Vec<ChatCompletionRequestUserMessageContentPart>, AiError> {
        let mut parts = Vec::with_capacity(msg.images.len() + 1);

        if !msg.content.is_empty() {
            let text = ChatCompletionRequestMessageContentPartTextArgs::default()
                .text(msg.content.clone())
                .build()
                .map_err(|e| AiError::Api(format!("Failed to build text part: {}", e)))?;
            parts.push(ChatCompletionRequestUserMessageContentPart::Text(text));
        }

        for image in &msg.images {
            let image_url = ImageUrlArgs::default()
                .url(image.data_uri())
                .detail(ImageDetail::High)
                .build()
                .map_err(|e| AiError::Api(format!("Failed to build image url: {}", e)))?;
            let part = ChatCompletionRequestMessageContentPartImageArgs::default()
                .image_url(image_url)
                .build()
                .map_err(|e| AiError::Api(format!("Failed to build image part: {}", e)))?;
            parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(part));
        }

        Ok(parts)
    }

    fn to_openai_format(format: &ResponseFormat) -> Option<OpenAiResponseFormat> {
        match format {
            ResponseFormat::Text => None,
            ResponseFormat::JsonSchema { name, schema } => Some(OpenAiResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: name.clone(),
                    schema: Some(schema.clone()),
                    strict: Some(true),
                },
            }),
        }
    }
}

#[async_trait]
impl AiClient for OpenAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(Self::to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut req_builder = CreateChatCompletionRequestArgs::default();
        req_builder.model(&self.model).messages(messages);

        if let Some(max_tokens) = request.max_tokens {
            req_builder.max_completion_tokens(max_tokens);
        }

        if let Some(temperature) = request.temperature {
            req_builder.temperature(temperature);
        }

        if let Some(format) = Self::to_openai_format(&request.response_format) {
            req_builder.response_format(format);
        }

        let openai_request = req_builder
            .build()
            .map_err(|e| AiError::Api(e.to_string()))?;

        tracing::debug!(
            prompt_name = prompt_name,
            model = &self.model,
            "Calling AI API"
        );

        let response = self
            .client
            .chat()
            .create(openai_request)
            .await
            .map_err(|e| AiError::Api(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| AiError::ParseError("response contained no message".to_string()))?;

        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        tracing::debug!(
            prompt_name = prompt_name,
            total_tokens = usage.total_tokens,
            "AI API call completed"
        );

        Ok(ChatResponse { content, usage })
    }
}
