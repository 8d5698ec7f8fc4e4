//! Backend-agnostic listing query.
//!
//! A [`RecipeQuery`] is built from a [`RecipeFilter`] plus raw page/limit values and is what
//! storage adapters translate into their own query language. Pagination bounds are applied
//! here so every adapter clamps the same way.

use crate::types::{Recipe, RecipeFilter, RecipePage};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Page and limit after clamping: `page >= 1`, `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Clamp raw values. A page below 1 becomes the first page, a limit below 1 becomes
    /// the default limit, and a limit above the maximum becomes the maximum.
    pub fn clamped(page: i64, limit: i64) -> Self {
        let page = if page < 1 { DEFAULT_PAGE } else { page };
        let limit = if limit < 1 {
            DEFAULT_LIMIT
        } else {
            limit.min(MAX_LIMIT)
        };
        Self { page, limit }
    }

    /// Number of matching rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }

    /// Wrap one page of results together with the counts derived from `total`.
    pub fn into_page(self, recipes: Vec<Recipe>, total: i64) -> RecipePage {
        RecipePage {
            recipes,
            total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages(total),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Normalized filter + pagination. Empty criteria have been dropped, so every
/// `Some`/non-empty field is a condition the adapter must apply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeQuery {
    pub title: Option<String>,
    pub ingredient_names: Vec<String>,
    pub max_cook_time: Option<i32>,
    pub tags: Vec<String>,
    pub pagination: Pagination,
}

impl RecipeQuery {
    pub fn new(filter: &RecipeFilter, page: i64, limit: i64) -> Self {
        Self {
            title: filter.title.clone().filter(|t| !t.is_empty()),
            ingredient_names: non_empty(&filter.ingredient_names),
            max_cook_time: filter.max_cook_time.filter(|t| *t > 0),
            tags: non_empty(&filter.tags),
            pagination: Pagination::clamped(page, limit),
        }
    }

    /// Whether `recipe` satisfies every condition of this query (pagination aside).
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(title) = &self.title {
            if !contains_ignore_case(&recipe.title, title) {
                return false;
            }
        }

        let has_all_ingredients = self.ingredient_names.iter().all(|wanted| {
            recipe
                .ingredients
                .iter()
                .any(|i| contains_ignore_case(&i.name, wanted))
        });
        if !has_all_ingredients {
            return false;
        }

        if let Some(max) = self.max_cook_time {
            if recipe.cook_time > max {
                return false;
            }
        }

        self.tags.iter().all(|tag| recipe.tags.contains(tag))
    }
}

/// SQL `LIKE` pattern matching `needle` anywhere, with wildcard characters escaped.
pub fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_empty(values: &[String]) -> Vec<String> {
    values.iter().filter(|v| !v.is_empty()).cloned().collect()
}
