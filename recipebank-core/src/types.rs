//! Recipe data model shared by the service, the storage adapters and the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single ingredient line, embedded in a recipe.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Ingredient {
    #[schema(example = "Flour")]
    pub name: String,
    /// Zero when the recipe gives no amount ("salt to taste").
    #[schema(example = 2.5)]
    pub quantity: f64,
    #[schema(example = "cups")]
    pub unit: String,
}

/// The user-editable part of a recipe.
///
/// This is the body of create/update requests and the result of AI extraction.
/// Missing fields decode to their empty value so that validation, not JSON decoding,
/// reports what is wrong with them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RecipeContent {
    #[schema(example = "Chocolate Chip Cookies")]
    pub title: String,
    #[schema(example = "Delicious homemade chocolate chip cookies")]
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    #[schema(example = json!(["Preheat oven to 190C", "Mix ingredients", "Bake for 10 minutes"]))]
    pub steps: Vec<String>,
    /// Minutes.
    #[schema(example = 30)]
    pub cook_time: i32,
    #[schema(example = 12)]
    pub servings: i32,
    #[schema(example = json!(["dessert", "baking"]))]
    pub tags: Vec<String>,
}

/// A persisted recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    #[schema(example = "1f0c1b7e-8a4e-4d43-9d0a-3b2a7f3c9e11")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub cook_time: i32,
    pub servings: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn from_content(
        id: String,
        content: RecipeContent,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: content.title,
            description: content.description,
            ingredients: content.ingredients,
            steps: content.steps,
            cook_time: content.cook_time,
            servings: content.servings,
            tags: content.tags,
            created_at,
            updated_at,
        }
    }

    /// The editable fields of this recipe.
    pub fn content(&self) -> RecipeContent {
        RecipeContent {
            title: self.title.clone(),
            description: self.description.clone(),
            ingredients: self.ingredients.clone(),
            steps: self.steps.clone(),
            cook_time: self.cook_time,
            servings: self.servings,
            tags: self.tags.clone(),
        }
    }
}

/// A validated recipe with its timestamps set, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub content: RecipeContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A full replacement of a stored recipe's content. `created_at` is never part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeUpdate {
    pub content: RecipeContent,
    pub updated_at: DateTime<Utc>,
}

/// Search criteria for listing recipes. An empty filter matches every recipe.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RecipeFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Every name must be a case-insensitive substring of some ingredient's name.
    pub ingredient_names: Vec<String>,
    /// Inclusive upper bound on cook time, in minutes. Values <= 0 are ignored.
    pub max_cook_time: Option<i32>,
    /// The recipe must carry all of these tags (exact match).
    pub tags: Vec<String>,
}

/// One page of a filtered listing, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipePage {
    pub recipes: Vec<Recipe>,
    /// Number of recipes matching the filter across all pages.
    #[schema(example = 100)]
    pub total: i64,
    #[schema(example = 1)]
    pub page: i64,
    #[schema(example = 10)]
    pub limit: i64,
    #[schema(example = 10)]
    pub total_pages: i64,
}
