use crate::api::extract::RecipeId;
use crate::api::{ApiError, ApiResponse, ErrorResponse};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use recipebank_core::Recipe;

#[utoipa::path(
    get,
    path = "/api/v1/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = ApiResponse<Recipe>),
        (status = 400, description = "Invalid recipe ID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(service): State<AppState>,
    RecipeId(id): RecipeId,
) -> Result<Json<ApiResponse<Recipe>>, ApiError> {
    let recipe = service.get_recipe(&id).await?;
    Ok(ApiResponse::ok(recipe))
}
