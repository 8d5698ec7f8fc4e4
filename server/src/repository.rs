//! PostgreSQL recipe storage.

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use recipebank_core::query::like_pattern;
use recipebank_core::repository::parse_id;
use recipebank_core::{
    NewRecipe, Recipe, RecipeFilter, RecipePage, RecipeQuery, RecipeRepository, RecipeUpdate,
    StorageError,
};
use std::time::Duration;

use crate::db::DbPool;
use crate::models::{NewRecipeRow, RecipeChanges, RecipeRow};
use crate::schema::recipes;

pub struct PgRecipeRepository {
    pool: DbPool,
    timeout: Duration,
}

impl PgRecipeRepository {
    pub fn new(pool: DbPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Run blocking diesel work on the blocking pool, bounded by the storage timeout.
    async fn run<T, F>(&self, work: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StorageError> + Send + 'static,
    {
        let pool = self.pool.clone();
        let task = tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| StorageError::Database(format!("connection failed: {}", e)))?;
            work(&mut conn)
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(StorageError::Database(format!("storage task failed: {}", e))),
            Err(_) => Err(StorageError::Timeout(self.timeout)),
        }
    }
}

fn db_error(e: diesel::result::Error) -> StorageError {
    StorageError::Database(e.to_string())
}

/// Translate a [`RecipeQuery`]'s conditions into a boxed diesel query.
fn filtered(query: &RecipeQuery) -> recipes::BoxedQuery<'static, Pg> {
    let mut q = recipes::table.into_boxed();

    if let Some(title) = &query.title {
        q = q.filter(recipes::title.ilike(like_pattern(title)));
    }

    // AND across names: each one must match some ingredient.
    for name in &query.ingredient_names {
        q = q.filter(
            sql::<Bool>(
                "EXISTS (SELECT 1 FROM jsonb_array_elements(recipes.ingredients) AS ingredient \
                 WHERE ingredient->>'name' ILIKE ",
            )
            .bind::<Text, _>(like_pattern(name))
            .sql(")"),
        );
    }

    if let Some(max) = query.max_cook_time {
        q = q.filter(recipes::cook_time.le(max));
    }

    if !query.tags.is_empty() {
        q = q.filter(recipes::tags.contains(query.tags.clone()));
    }

    q
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StorageError> {
        let row = NewRecipeRow::new(recipe.content, recipe.created_at, recipe.updated_at)?;
        self.run(move |conn| {
            diesel::insert_into(recipes::table)
                .values(&row)
                .returning(RecipeRow::as_returning())
                .get_result::<RecipeRow>(conn)
                .map_err(db_error)
                .and_then(Recipe::try_from)
        })
        .await
    }

    async fn get_by_id(&self, id: &str) -> Result<Recipe, StorageError> {
        let uuid = parse_id(id)?;
        let id = id.to_string();
        self.run(move |conn| {
            recipes::table
                .find(uuid)
                .select(RecipeRow::as_select())
                .first::<RecipeRow>(conn)
                .optional()
                .map_err(db_error)?
                .ok_or(StorageError::NotFound(id))
                .and_then(Recipe::try_from)
        })
        .await
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: i64,
        limit: i64,
    ) -> Result<RecipePage, StorageError> {
        let query = RecipeQuery::new(filter, page, limit);
        self.run(move |conn| {
            let total: i64 = filtered(&query)
                .count()
                .get_result(conn)
                .map_err(db_error)?;

            let rows: Vec<RecipeRow> = filtered(&query)
                .order((recipes::created_at.desc(), recipes::id.desc()))
                .offset(query.pagination.offset())
                .limit(query.pagination.limit)
                .select(RecipeRow::as_select())
                .load(conn)
                .map_err(db_error)?;

            let recipes = rows
                .into_iter()
                .map(Recipe::try_from)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(query.pagination.into_page(recipes, total))
        })
        .await
    }

    async fn update(&self, id: &str, update: RecipeUpdate) -> Result<Recipe, StorageError> {
        let uuid = parse_id(id)?;
        let id = id.to_string();
        let changes = RecipeChanges::new(update.content, update.updated_at)?;
        self.run(move |conn| {
            diesel::update(recipes::table.find(uuid))
                .set(&changes)
                .returning(RecipeRow::as_returning())
                .get_result::<RecipeRow>(conn)
                .optional()
                .map_err(db_error)?
                .ok_or(StorageError::NotFound(id))
                .and_then(Recipe::try_from)
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let uuid = parse_id(id)?;
        let id = id.to_string();
        self.run(move |conn| {
            let deleted = diesel::delete(recipes::table.find(uuid))
                .execute(conn)
                .map_err(db_error)?;
            if deleted == 0 {
                return Err(StorageError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}
