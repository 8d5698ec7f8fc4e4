use crate::api::extract::RecipeId;
use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;

#[utoipa::path(
    delete,
    path = "/api/v1/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 400, description = "Invalid recipe ID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(service): State<AppState>,
    RecipeId(id): RecipeId,
) -> Result<StatusCode, ApiError> {
    service.delete_recipe(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
