use crate::api::extract::JsonBody;
use crate::api::{ApiError, ApiResponse, ErrorResponse};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use recipebank_core::{Recipe, RecipeContent};

#[utoipa::path(
    post,
    path = "/api/v1/recipe",
    tag = "recipes",
    request_body = RecipeContent,
    responses(
        (status = 201, description = "Recipe created successfully", body = ApiResponse<Recipe>),
        (status = 400, description = "Invalid JSON or failed validation", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(service): State<AppState>,
    JsonBody(request): JsonBody<RecipeContent>,
) -> Result<(StatusCode, Json<ApiResponse<Recipe>>), ApiError> {
    let recipe = service.create_recipe(request).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(recipe)))
}
