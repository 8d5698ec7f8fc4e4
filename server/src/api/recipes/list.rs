use crate::api::{ApiError, ApiResponse, ErrorResponse};
use crate::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use recipebank_core::{RecipeFilter, RecipePage, DEFAULT_LIMIT, DEFAULT_PAGE};
use serde::Deserialize;
use utoipa::IntoParams;

/// Raw query parameters. Numbers arrive as strings so that a bad value can be reported
/// by name.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecipesParams {
    /// Page number (default: 1)
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
    /// Items per page (default: 10, max: 100)
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Maximum cook time in minutes
    #[param(value_type = Option<i32>)]
    pub cook_time: Option<String>,
    /// Comma-separated ingredient names; every one must match
    pub ingredients: Option<String>,
    /// Comma-separated tags; every one must be present
    pub tags: Option<String>,
}

impl ListRecipesParams {
    fn into_parts(self) -> Result<(RecipeFilter, i64, i64), ApiError> {
        let page = parse_number(self.page, "page", DEFAULT_PAGE)?;
        let limit = parse_number(self.limit, "limit", DEFAULT_LIMIT)?;
        let cook_time: i32 = parse_number(self.cook_time, "cook_time", 0)?;

        let filter = RecipeFilter {
            title: self.title.filter(|t| !t.is_empty()),
            ingredient_names: split_csv(self.ingredients.as_deref()),
            max_cook_time: Some(cook_time).filter(|t| *t > 0),
            tags: split_csv(self.tags.as_deref()),
        };

        Ok((filter, page, limit))
    }
}

fn parse_number<T: std::str::FromStr>(
    value: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ApiError> {
    match value.as_deref() {
        None | Some("") => Ok(default),
        Some(v) => v.parse().map_err(|_| ApiError::InvalidQueryParam(name)),
    }
}

fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[utoipa::path(
    get,
    path = "/api/v1/recipe",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "One page of matching recipes, newest first", body = ApiResponse<RecipePage>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(service): State<AppState>,
    params: Result<Query<ListRecipesParams>, QueryRejection>,
) -> Result<Json<ApiResponse<RecipePage>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::MalformedQuery(e.body_text()))?;
    let (filter, page, limit) = params.into_parts()?;

    let recipes = service.get_recipes(&filter, page, limit).await?;
    Ok(ApiResponse::ok(recipes))
}
