pub mod ai;
pub mod error;
pub mod http;
pub mod image;
pub mod query;
pub mod repository;
pub mod service;
pub mod types;
pub mod validation;

pub use error::{FetchError, ServiceError, StorageError};
pub use image::{decode_image, DecodedImage, ImageError, ImageType};
pub use query::{Pagination, RecipeQuery, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
pub use repository::{InMemoryRecipeRepository, RecipeRepository};
pub use service::RecipeService;
pub use types::{Ingredient, NewRecipe, Recipe, RecipeContent, RecipeFilter, RecipePage, RecipeUpdate};
pub use validation::{validate_recipe, ValidationError};
