//! Storage contract for recipes.
//!
//! The service layer only talks to [`RecipeRepository`]; concrete backends live behind it.
//! This crate ships the in-memory backend, the server crate adds Postgres.

mod memory;

pub use memory::InMemoryRecipeRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StorageError;
use crate::types::{NewRecipe, Recipe, RecipeFilter, RecipePage, RecipeUpdate};

/// Persistent recipe storage.
///
/// Implementations assign IDs on create, list newest first (`created_at` descending)
/// and clamp pagination with [`crate::Pagination::clamped`].
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StorageError>;

    async fn get_by_id(&self, id: &str) -> Result<Recipe, StorageError>;

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: i64,
        limit: i64,
    ) -> Result<RecipePage, StorageError>;

    /// Replace the content of an existing recipe. `created_at` is preserved.
    async fn update(&self, id: &str, update: RecipeUpdate) -> Result<Recipe, StorageError>;

    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// Parse a recipe ID. Anything that is not a UUID is [`StorageError::InvalidId`].
pub fn parse_id(id: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(id).map_err(|_| StorageError::InvalidId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_id("not-a-uuid"),
            Err(StorageError::InvalidId(s)) if s == "not-a-uuid"
        ));
    }
}
