use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{parse_id, RecipeRepository};
use crate::error::StorageError;
use crate::query::RecipeQuery;
use crate::types::{NewRecipe, Recipe, RecipeFilter, RecipePage, RecipeUpdate};

/// Process-local recipe storage. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    // Newest first; ties on created_at keep the later insert in front.
    recipes: RwLock<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StorageError> {
        let stored = Recipe::from_content(
            Uuid::new_v4().to_string(),
            recipe.content,
            recipe.created_at,
            recipe.updated_at,
        );

        let mut recipes = self.recipes.write().await;
        let pos = recipes
            .iter()
            .position(|r| r.created_at <= stored.created_at)
            .unwrap_or(recipes.len());
        recipes.insert(pos, stored.clone());

        Ok(stored)
    }

    async fn get_by_id(&self, id: &str) -> Result<Recipe, StorageError> {
        let key = parse_id(id)?.to_string();
        self.recipes
            .read()
            .await
            .iter()
            .find(|r| r.id == key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: i64,
        limit: i64,
    ) -> Result<RecipePage, StorageError> {
        let query = RecipeQuery::new(filter, page, limit);
        let recipes = self.recipes.read().await;

        let matching: Vec<&Recipe> = recipes.iter().filter(|r| query.matches(r)).collect();
        let total = matching.len() as i64;

        let offset = usize::try_from(query.pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.pagination.limit).unwrap_or(usize::MAX);
        let page_items = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(query.pagination.into_page(page_items, total))
    }

    async fn update(&self, id: &str, update: RecipeUpdate) -> Result<Recipe, StorageError> {
        let key = parse_id(id)?.to_string();
        let mut recipes = self.recipes.write().await;
        let existing = recipes
            .iter_mut()
            .find(|r| r.id == key)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        *existing = Recipe::from_content(
            existing.id.clone(),
            update.content,
            existing.created_at,
            update.updated_at,
        );
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let key = parse_id(id)?.to_string();
        let mut recipes = self.recipes.write().await;
        let before = recipes.len();
        recipes.retain(|r| r.id != key);
        if recipes.len() == before {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Ingredient, RecipeContent};
    use chrono::{Duration, TimeZone, Utc};

    fn content(title: &str, cook_time: i32, tags: &[&str]) -> RecipeContent {
        RecipeContent {
            title: title.to_string(),
            description: String::new(),
            ingredients: vec![Ingredient {
                name: "Flour".to_string(),
                quantity: 1.0,
                unit: "cup".to_string(),
            }],
            steps: vec!["Mix".to_string()],
            cook_time,
            servings: 2,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn new_recipe(title: &str, minutes_after_epoch: i64) -> NewRecipe {
        let at = Utc.timestamp_opt(0, 0).unwrap() + Duration::minutes(minutes_after_epoch);
        NewRecipe {
            content: content(title, 20, &[]),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = InMemoryRecipeRepository::new();
        let created = repo.create(new_recipe("Soup", 1)).await.unwrap();

        assert!(Uuid::parse_str(&created.id).is_ok());
        let fetched = repo.get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_unknown_and_malformed_ids() {
        let repo = InMemoryRecipeRepository::new();
        let missing = Uuid::new_v4().to_string();

        assert!(matches!(
            repo.get_by_id(&missing).await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            repo.get_by_id("abc").await,
            Err(StorageError::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_paginated() {
        let repo = InMemoryRecipeRepository::new();
        for (i, title) in ["first", "second", "third"].iter().enumerate() {
            repo.create(new_recipe(title, i as i64)).await.unwrap();
        }

        let page = repo.list(&RecipeFilter::default(), 1, 2).await.unwrap();
        let titles: Vec<_> = page.recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);

        let page = repo.list(&RecipeFilter::default(), 2, 2).await.unwrap();
        assert_eq!(page.recipes.len(), 1);
        assert_eq!(page.recipes[0].title, "first");

        let page = repo.list(&RecipeFilter::default(), 5, 2).await.unwrap();
        assert!(page.recipes.is_empty());
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_list_out_of_order_inserts() {
        let repo = InMemoryRecipeRepository::new();
        repo.create(new_recipe("middle", 5)).await.unwrap();
        repo.create(new_recipe("old", 1)).await.unwrap();
        repo.create(new_recipe("new", 9)).await.unwrap();

        let page = repo.list(&RecipeFilter::default(), 1, 10).await.unwrap();
        let titles: Vec<_> = page.recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "middle", "old"]);
    }

    #[tokio::test]
    async fn test_list_clamps_pagination() {
        let repo = InMemoryRecipeRepository::new();
        let page = repo.list(&RecipeFilter::default(), 0, 1000).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 100);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_list_applies_filter() {
        let repo = InMemoryRecipeRepository::new();
        let now = Utc::now();
        for (title, cook, tags) in [
            ("Quick Pancakes", 15, vec!["breakfast", "quick"]),
            ("Slow Roast", 240, vec!["dinner"]),
            ("Quick Salad", 5, vec!["quick"]),
        ] {
            repo.create(NewRecipe {
                content: content(title, cook, &tags),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        }

        let filter = RecipeFilter {
            title: Some("quick".to_string()),
            max_cook_time: Some(10),
            ..Default::default()
        };
        let page = repo.list(&filter, 1, 10).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.recipes[0].title, "Quick Salad");

        let filter = RecipeFilter {
            tags: vec!["quick".to_string(), "breakfast".to_string()],
            ..Default::default()
        };
        let page = repo.list(&filter, 1, 10).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.recipes[0].title, "Quick Pancakes");
    }

    #[tokio::test]
    async fn test_update_preserves_created_at() {
        let repo = InMemoryRecipeRepository::new();
        let created = repo.create(new_recipe("Soup", 1)).await.unwrap();
        let later = created.created_at + Duration::hours(1);

        let updated = repo
            .update(
                &created.id,
                RecipeUpdate {
                    content: content("Better Soup", 25, &["soup"]),
                    updated_at: later,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Better Soup");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, later);
        assert_eq!(repo.get_by_id(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryRecipeRepository::new();
        let result = repo
            .update(
                &Uuid::new_v4().to_string(),
                RecipeUpdate {
                    content: content("x", 1, &[]),
                    updated_at: Utc::now(),
                },
            )
            .await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryRecipeRepository::new();
        let created = repo.create(new_recipe("Soup", 1)).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        assert!(matches!(
            repo.get_by_id(&created.id).await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(&created.id).await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete("nope").await,
            Err(StorageError::InvalidId(_))
        ));
    }
}
