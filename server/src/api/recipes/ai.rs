//! AI-assisted recipe creation. Both endpoints extract a recipe and then store it.

use crate::api::extract::JsonBody;
use crate::api::{ApiError, ApiResponse, ErrorResponse};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use recipebank_core::Recipe;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct FromImageRequest {
    /// Base64 image data, optionally with a `data:image/...;base64,` prefix
    #[schema(example = "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQAAAQ...")]
    pub image: String,
    /// `jpeg`, `jpg` or `png`; detected from the data when empty
    #[schema(example = "jpeg")]
    pub image_type: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct FromUrlRequest {
    #[schema(example = "https://example.com/recipe")]
    pub url: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/recipe/ai/from-image",
    tag = "ai-recipes",
    request_body = FromImageRequest,
    responses(
        (status = 201, description = "Recipe created from image", body = ApiResponse<Recipe>),
        (status = 400, description = "Invalid image, AI disabled or AI failure", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_recipe_from_image(
    State(service): State<AppState>,
    JsonBody(request): JsonBody<FromImageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Recipe>>), ApiError> {
    let recipe = service
        .create_recipe_from_image(&request.image, &request.image_type)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(recipe)))
}

#[utoipa::path(
    post,
    path = "/api/v1/recipe/ai/from-url",
    tag = "ai-recipes",
    request_body = FromUrlRequest,
    responses(
        (status = 201, description = "Recipe created from web page", body = ApiResponse<Recipe>),
        (status = 400, description = "Unreachable URL, AI disabled or AI failure", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_recipe_from_url(
    State(service): State<AppState>,
    JsonBody(request): JsonBody<FromUrlRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Recipe>>), ApiError> {
    let recipe = service.create_recipe_from_url(&request.url).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(recipe)))
}
