use crate::api::extract::{JsonBody, RecipeId};
use crate::api::{ApiError, ApiResponse, ErrorResponse};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use recipebank_core::{Recipe, RecipeContent};

/// Replaces every editable field; omitted fields become empty and fail validation.
#[utoipa::path(
    put,
    path = "/api/v1/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = RecipeContent,
    responses(
        (status = 200, description = "Recipe updated successfully", body = ApiResponse<Recipe>),
        (status = 400, description = "Invalid ID, JSON or recipe", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(service): State<AppState>,
    RecipeId(id): RecipeId,
    JsonBody(request): JsonBody<RecipeContent>,
) -> Result<Json<ApiResponse<Recipe>>, ApiError> {
    let recipe = service.update_recipe(&id, request).await?;
    Ok(ApiResponse::ok(recipe))
}
