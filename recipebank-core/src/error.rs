use std::time::Duration;

use thiserror::Error;

use crate::ai::AiError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("URL is not accessible (status {0})")]
    Unreachable(u16),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors reported by a [`crate::RecipeRepository`] implementation.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("recipe with ID {0} not found")]
    NotFound(String),

    #[error("invalid ID format: {0}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Domain error kinds surfaced by [`crate::RecipeService`].
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("AI is not supported")]
    AiUnsupported,

    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
