pub mod ai;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use recipebank_core::{Ingredient, Recipe, RecipeContent, RecipePage};
use utoipa::OpenApi;

/// Returns the router for recipe endpoints (mounted at /api/v1)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipe", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/recipe/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/recipe/ai/from-image", post(ai::create_recipe_from_image))
        .route("/recipe/ai/from-url", post(ai::create_recipe_from_url))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        get::get_recipe,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
        ai::create_recipe_from_image,
        ai::create_recipe_from_url,
    ),
    components(schemas(
        Recipe,
        RecipeContent,
        Ingredient,
        RecipePage,
        ai::FromImageRequest,
        ai::FromUrlRequest,
    ))
)]
pub struct ApiDoc;
