use chrono::{DateTime, Utc};
use diesel::prelude::*;
use recipebank_core::{Ingredient, Recipe, RecipeContent, StorageError};
use uuid::Uuid;

use crate::schema::recipes;

/// A recipe document row. Ingredients live in a JSONB column.
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: serde_json::Value,
    pub steps: Vec<String>,
    pub cook_time: i32,
    pub servings: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = StorageError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let ingredients: Vec<Ingredient> = serde_json::from_value(row.ingredients)
            .map_err(|e| StorageError::Database(format!("corrupt ingredients column: {}", e)))?;

        Ok(Recipe {
            id: row.id.to_string(),
            title: row.title,
            description: row.description,
            ingredients,
            steps: row.steps,
            cook_time: row.cook_time,
            servings: row.servings,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = recipes)]
pub struct NewRecipeRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: serde_json::Value,
    pub steps: Vec<String>,
    pub cook_time: i32,
    pub servings: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement of the editable columns. `created_at` is not part of it.
#[derive(AsChangeset)]
#[diesel(table_name = recipes)]
pub struct RecipeChanges {
    pub title: String,
    pub description: String,
    pub ingredients: serde_json::Value,
    pub steps: Vec<String>,
    pub cook_time: i32,
    pub servings: i32,
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

pub fn ingredients_json(ingredients: &[Ingredient]) -> Result<serde_json::Value, StorageError> {
    serde_json::to_value(ingredients).map_err(|e| StorageError::Database(e.to_string()))
}

impl RecipeChanges {
    pub fn new(content: RecipeContent, updated_at: DateTime<Utc>) -> Result<Self, StorageError> {
        Ok(Self {
            ingredients: ingredients_json(&content.ingredients)?,
            title: content.title,
            description: content.description,
            steps: content.steps,
            cook_time: content.cook_time,
            servings: content.servings,
            tags: content.tags,
            updated_at,
        })
    }
}

impl NewRecipeRow {
    pub fn new(
        content: RecipeContent,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            id: Uuid::new_v4(),
            ingredients: ingredients_json(&content.ingredients)?,
            title: content.title,
            description: content.description,
            steps: content.steps,
            cook_time: content.cook_time,
            servings: content.servings,
            tags: content.tags,
            created_at,
            updated_at,
        })
    }
}
