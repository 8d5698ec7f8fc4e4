//! Recipe service: validation, timestamps and AI orchestration over a [`RecipeRepository`].

use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;

use crate::ai::RecipeExtractor;
use crate::error::ServiceError;
use crate::image::decode_image;
use crate::repository::RecipeRepository;
use crate::types::{NewRecipe, Recipe, RecipeContent, RecipeFilter, RecipePage, RecipeUpdate};
use crate::validation::validate_recipe;

pub struct RecipeService {
    repository: Arc<dyn RecipeRepository>,
    extractor: Option<RecipeExtractor>,
}

impl RecipeService {
    /// A service without AI extraction.
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self {
            repository,
            extractor: None,
        }
    }

    pub fn with_extractor(mut self, extractor: RecipeExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn ai_enabled(&self) -> bool {
        self.extractor.is_some()
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Recipe, ServiceError> {
        require_id(id)?;
        Ok(self.repository.get_by_id(id).await?)
    }

    /// Pagination is clamped by the repository, not here.
    pub async fn get_recipes(
        &self,
        filter: &RecipeFilter,
        page: i64,
        limit: i64,
    ) -> Result<RecipePage, ServiceError> {
        Ok(self.repository.list(filter, page, limit).await?)
    }

    pub async fn create_recipe(&self, content: RecipeContent) -> Result<Recipe, ServiceError> {
        validate_recipe(&content)?;

        let now = now();
        let recipe = self
            .repository
            .create(NewRecipe {
                content,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(recipe_id = %recipe.id, "Created recipe");
        Ok(recipe)
    }

    pub async fn update_recipe(
        &self,
        id: &str,
        content: RecipeContent,
    ) -> Result<Recipe, ServiceError> {
        require_id(id)?;
        validate_recipe(&content)?;

        let current = self.repository.get_by_id(id).await?;
        let recipe = self
            .repository
            .update(
                id,
                RecipeUpdate {
                    content,
                    updated_at: next_timestamp(current.updated_at),
                },
            )
            .await?;

        tracing::info!(recipe_id = %recipe.id, "Updated recipe");
        Ok(recipe)
    }

    pub async fn delete_recipe(&self, id: &str) -> Result<(), ServiceError> {
        require_id(id)?;
        self.repository.delete(id).await?;

        tracing::info!(recipe_id = id, "Deleted recipe");
        Ok(())
    }

    /// Extract a recipe from a base64 photo without storing it.
    ///
    /// `image_type` is `jpeg`, `jpg` or `png`; empty means "detect from the data".
    pub async fn extract_recipe_from_image(
        &self,
        image: &str,
        image_type: &str,
    ) -> Result<RecipeContent, ServiceError> {
        let extractor = self.extractor()?;
        let image = decode_image(image, image_type)
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

        Ok(extractor.from_image(&image).await?)
    }

    /// Extract a recipe from a web page without storing it.
    pub async fn extract_recipe_from_url(&self, url: &str) -> Result<RecipeContent, ServiceError> {
        let extractor = self.extractor()?;
        extractor
            .check_url(url)
            .await
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

        let page_text = extractor.fetch_page_text(url).await;
        Ok(extractor.from_url(url, page_text.as_deref()).await?)
    }

    /// Extract a recipe from a photo, then store it like [`Self::create_recipe`].
    pub async fn create_recipe_from_image(
        &self,
        image: &str,
        image_type: &str,
    ) -> Result<Recipe, ServiceError> {
        let content = self.extract_recipe_from_image(image, image_type).await?;
        self.create_recipe(content).await
    }

    /// Extract a recipe from a web page, then store it like [`Self::create_recipe`].
    pub async fn create_recipe_from_url(&self, url: &str) -> Result<Recipe, ServiceError> {
        let content = self.extract_recipe_from_url(url).await?;
        self.create_recipe(content).await
    }

    fn extractor(&self) -> Result<&RecipeExtractor, ServiceError> {
        self.extractor.as_ref().ok_or(ServiceError::AiUnsupported)
    }
}

fn require_id(id: &str) -> Result<(), ServiceError> {
    if id.trim().is_empty() {
        return Err(ServiceError::InvalidInput("id is required".to_string()));
    }
    Ok(())
}

// Microsecond precision, so a stored recipe reads back identical from every backend.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// `updated_at` must move forward even when two writes land in the same microsecond.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiError, FakeAiClient};
    use crate::error::StorageError;
    use crate::http::{MockClient, MockResponse};
    use crate::repository::InMemoryRecipeRepository;
    use crate::types::Ingredient;
    use crate::validation::ValidationError;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use std::time::Duration;

    const EXTRACTED: &str = r#"{
        "title": "Pancakes",
        "description": "",
        "ingredients": [{"name": "Flour", "quantity": 1, "unit": "cup"}],
        "steps": ["Mix", "Fry"],
        "cook_time": 15,
        "servings": 2
    }"#;

    fn content(title: &str) -> RecipeContent {
        RecipeContent {
            title: title.to_string(),
            description: String::new(),
            ingredients: vec![Ingredient {
                name: "Flour".to_string(),
                quantity: 1.0,
                unit: "cup".to_string(),
            }],
            steps: vec!["Mix".to_string()],
            cook_time: 10,
            servings: 2,
            tags: vec![],
        }
    }

    fn service() -> RecipeService {
        RecipeService::new(Arc::new(InMemoryRecipeRepository::new()))
    }

    fn ai_service(ai: Arc<FakeAiClient>, http: MockClient) -> RecipeService {
        service().with_extractor(RecipeExtractor::new(
            ai,
            Arc::new(http),
            Duration::from_secs(5),
        ))
    }

    #[tokio::test]
    async fn test_create_sets_equal_timestamps() {
        let service = service();
        let created = service.create_recipe(content("Test")).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.content(), content("Test"));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_recipe() {
        let service = service();
        let mut invalid = content("Test");
        invalid.servings = 0;

        assert!(matches!(
            service.create_recipe(invalid).await,
            Err(ServiceError::Validation(ValidationError::InvalidServings))
        ));
        let page = service
            .get_recipes(&RecipeFilter::default(), 1, 10)
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() {
        let service = service();
        let created = service.create_recipe(content("Test")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;

        let updated = service
            .update_recipe(&created.id, content("Renamed"))
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_back_to_back_updates_always_advance() {
        let service = service();
        let created = service.create_recipe(content("Test")).await.unwrap();

        let first = service
            .update_recipe(&created.id, content("One"))
            .await
            .unwrap();
        let second = service
            .update_recipe(&created.id, content("Two"))
            .await
            .unwrap();
        assert!(first.updated_at > created.updated_at);
        assert!(second.updated_at > first.updated_at);
    }

    #[test]
    fn test_next_timestamp_after_future_previous() {
        let previous = now() + chrono::Duration::seconds(10);
        assert_eq!(
            next_timestamp(previous),
            previous + chrono::Duration::microseconds(1)
        );
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let service = service();
        let result = service.update_recipe("not-a-uuid", RecipeContent::default()).await;
        assert!(matches!(
            result,
            Err(ServiceError::Validation(ValidationError::MissingTitle))
        ));
    }

    #[tokio::test]
    async fn test_empty_id_is_invalid_input() {
        let service = service();
        assert!(matches!(
            service.get_recipe("").await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            service.update_recipe(" ", content("x")).await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            service.delete_recipe("").await,
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service();
        let created = service.create_recipe(content("Test")).await.unwrap();

        service.delete_recipe(&created.id).await.unwrap();
        assert!(matches!(
            service.get_recipe(&created.id).await,
            Err(ServiceError::Storage(StorageError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_ai_disabled() {
        let service = service();
        assert!(!service.ai_enabled());
        assert!(matches!(
            service.create_recipe_from_url("https://example.com").await,
            Err(ServiceError::AiUnsupported)
        ));
        assert!(matches!(
            service.create_recipe_from_image("abc", "png").await,
            Err(ServiceError::AiUnsupported)
        ));
    }

    #[tokio::test]
    async fn test_create_from_image_persists() {
        let ai = Arc::new(FakeAiClient::with_default_response(EXTRACTED));
        let service = ai_service(ai.clone(), MockClient::new());
        let image = STANDARD.encode([0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);

        let created = service.create_recipe_from_image(&image, "png").await.unwrap();
        assert_eq!(created.title, "Pancakes");
        assert_eq!(service.get_recipe(&created.id).await.unwrap(), created);
        assert_eq!(ai.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_bad_image_never_reaches_model() {
        let ai = Arc::new(FakeAiClient::with_default_response(EXTRACTED));
        let service = ai_service(ai.clone(), MockClient::new());
        let gif = STANDARD.encode(b"GIF89a....");

        assert!(matches!(
            service.create_recipe_from_image(&gif, "jpeg").await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(ai.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_from_url() {
        let url = "https://example.com/pancakes";
        let http = MockClient::new().with_html(url, "<body><p>Pancakes</p></body>");
        let ai = Arc::new(FakeAiClient::with_default_response(EXTRACTED));
        let service = ai_service(ai, http);

        let created = service.create_recipe_from_url(url).await.unwrap();
        assert_eq!(created.steps, vec!["Mix", "Fry"]);
    }

    #[tokio::test]
    async fn test_unreachable_url_is_invalid_input() {
        let url = "https://example.com/missing";
        let http = MockClient::new().with_response(url, MockResponse::Status(404));
        let ai = Arc::new(FakeAiClient::with_default_response(EXTRACTED));
        let service = ai_service(ai.clone(), http);

        assert!(matches!(
            service.create_recipe_from_url(url).await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            service.create_recipe_from_url("not a url").await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(ai.requests().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_is_ai_error() {
        let url = "https://example.com/pancakes";
        let http = MockClient::new().with_html(url, "<p>x</p>");
        let service = ai_service(Arc::new(FakeAiClient::failing("down")), http);

        assert!(matches!(
            service.create_recipe_from_url(url).await,
            Err(ServiceError::Ai(AiError::Api(_)))
        ));
    }

    #[tokio::test]
    async fn test_extracted_recipe_is_validated() {
        let url = "https://example.com/empty";
        let http = MockClient::new().with_html(url, "<p>x</p>");
        let ai = Arc::new(FakeAiClient::with_default_response(r#"{"title": "Nothing"}"#));
        let service = ai_service(ai, http);

        assert!(matches!(
            service.create_recipe_from_url(url).await,
            Err(ServiceError::Validation(ValidationError::NoIngredients))
        ));
    }
}
