//! AI-assisted recipe extraction.
//!
//! This module provides:
//! - `AiClient` trait for abstracting chat-completion providers
//! - `OpenAiClient` for any OpenAI-compatible API, and `FakeAiClient` for tests
//! - `RecipeExtractor`, which turns a photo or a web page into a [`crate::RecipeContent`]
//!
//! Configuration is passed in as an [`AiConfig`]; this module never reads the environment.
//!
//! # Example
//!
//! ```ignore
//! use recipebank_core::ai::{AiConfig, OpenAiClient, RecipeExtractor};
//!
//! let config = AiConfig::new(api_key);
//! let extractor = RecipeExtractor::new(Arc::new(OpenAiClient::new(&config)?), http, config.timeout);
//! let recipe = extractor.from_image(&image).await?;
//! ```

mod client;
mod config;
mod extract;
mod fake;
pub mod prompts;
mod types;

pub use client::{AiClient, AiError, OpenAiClient};
pub use config::{AiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
pub use extract::RecipeExtractor;
pub use fake::FakeAiClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat, Role, Usage};
