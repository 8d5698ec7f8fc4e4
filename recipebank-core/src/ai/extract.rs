//! Recipe extraction from photos and web pages.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::client::{AiClient, AiError};
use super::prompts::recipe_extract::{
    recipe_json_schema, render_image_prompt, render_system_prompt, render_url_prompt,
    RECIPE_EXTRACT_PROMPT_NAME, RECIPE_SCHEMA_NAME,
};
use super::types::{ChatMessage, ChatRequest, ResponseFormat};
use crate::error::FetchError;
use crate::http::{visible_text, HttpClient, MAX_PAGE_TEXT_CHARS};
use crate::image::DecodedImage;
use crate::types::{Ingredient, RecipeContent};

const MAX_COMPLETION_TOKENS: u32 = 2000;

#[derive(Debug, Deserialize)]
struct ExtractedRecipe {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    cook_time: i32,
    #[serde(default)]
    servings: i32,
}

impl From<ExtractedRecipe> for RecipeContent {
    fn from(extracted: ExtractedRecipe) -> Self {
        RecipeContent {
            title: extracted.title,
            description: extracted.description,
            ingredients: extracted.ingredients,
            steps: extracted.steps,
            cook_time: extracted.cook_time,
            servings: extracted.servings,
            tags: Vec::new(),
        }
    }
}

/// Turns a photo or a web page into recipe content with the help of an [`AiClient`].
///
/// Extraction never persists anything; the caller decides what to do with the result.
pub struct RecipeExtractor {
    client: Arc<dyn AiClient>,
    http: Arc<dyn HttpClient>,
    timeout: Duration,
}

impl RecipeExtractor {
    pub fn new(client: Arc<dyn AiClient>, http: Arc<dyn HttpClient>, timeout: Duration) -> Self {
        Self {
            client,
            http,
            timeout,
        }
    }

    pub async fn from_image(&self, image: &DecodedImage) -> Result<RecipeContent, AiError> {
        let request = Self::request(ChatMessage::user_with_images(
            render_image_prompt(),
            vec![image.clone()],
        ));
        self.run(request).await
    }

    /// Require `url` to be an http(s) URL answering a HEAD request with 2xx.
    pub async fn check_url(&self, url: &str) -> Result<(), FetchError> {
        self.http.check_reachable(url).await
    }

    /// Visible text of the page at `url`, or `None` when it cannot be downloaded.
    pub async fn fetch_page_text(&self, url: &str) -> Option<String> {
        match self.http.fetch_html(url).await {
            Ok(html) => Some(visible_text(&html, MAX_PAGE_TEXT_CHARS)),
            Err(e) => {
                tracing::warn!(url, error = %e, "Failed to fetch page, prompting with URL only");
                None
            }
        }
    }

    pub async fn from_url(
        &self,
        url: &str,
        page_text: Option<&str>,
    ) -> Result<RecipeContent, AiError> {
        let request = Self::request(ChatMessage::user(render_url_prompt(url, page_text)));
        self.run(request).await
    }

    fn request(user_message: ChatMessage) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::system(render_system_prompt()), user_message],
            max_tokens: Some(MAX_COMPLETION_TOKENS),
            temperature: Some(0.1),
            response_format: ResponseFormat::JsonSchema {
                name: RECIPE_SCHEMA_NAME.to_string(),
                schema: recipe_json_schema(),
            },
        }
    }

    async fn run(&self, request: ChatRequest) -> Result<RecipeContent, AiError> {
        let response = tokio::time::timeout(
            self.timeout,
            self.client.complete(RECIPE_EXTRACT_PROMPT_NAME, request),
        )
        .await
        .map_err(|_| AiError::Timeout(self.timeout))??;

        parse_recipe(&response.content)
    }
}

/// Decode the model's answer. Some models wrap JSON in a Markdown code fence.
fn parse_recipe(content: &str) -> Result<RecipeContent, AiError> {
    let json = strip_code_fence(content);
    let extracted: ExtractedRecipe = serde_json::from_str(json).map_err(|e| {
        AiError::ParseError(format!("Failed to parse recipe extraction response: {}", e))
    })?;
    Ok(extracted.into())
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;
    use crate::http::{MockClient, MockResponse};
    use crate::image::ImageType;

    const CARBONARA: &str = r#"{
        "title": "Spaghetti Carbonara",
        "description": "Roman pasta",
        "ingredients": [
            {"name": "spaghetti", "quantity": 500, "unit": "g"},
            {"name": "salt", "quantity": 0, "unit": ""}
        ],
        "steps": ["Boil pasta", "Mix with eggs"],
        "cook_time": 25,
        "servings": 4
    }"#;

    fn extractor(ai: Arc<FakeAiClient>, http: MockClient) -> RecipeExtractor {
        RecipeExtractor::new(ai, Arc::new(http), Duration::from_secs(5))
    }

    fn jpeg() -> DecodedImage {
        DecodedImage {
            data: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00],
            image_type: ImageType::Jpeg,
        }
    }

    #[test]
    fn test_parse_recipe() {
        let content = parse_recipe(CARBONARA).unwrap();
        assert_eq!(content.title, "Spaghetti Carbonara");
        assert_eq!(content.ingredients.len(), 2);
        assert_eq!(content.ingredients[0].quantity, 500.0);
        assert_eq!(content.steps, vec!["Boil pasta", "Mix with eggs"]);
        assert_eq!(content.cook_time, 25);
        assert_eq!(content.servings, 4);
        assert!(content.tags.is_empty());
    }

    #[test]
    fn test_parse_recipe_in_code_fence() {
        let fenced = format!("```json\n{}\n```", CARBONARA);
        assert_eq!(parse_recipe(&fenced).unwrap().title, "Spaghetti Carbonara");
    }

    #[test]
    fn test_parse_recipe_rejects_prose() {
        assert!(matches!(
            parse_recipe("Sorry, I can't see a recipe."),
            Err(AiError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_from_image_sends_image_and_schema() {
        let ai = Arc::new(FakeAiClient::with_default_response(CARBONARA));
        let content = extractor(ai.clone(), MockClient::new())
            .from_image(&jpeg())
            .await
            .unwrap();
        assert_eq!(content.title, "Spaghetti Carbonara");

        let requests = ai.requests();
        assert_eq!(requests.len(), 1);
        let (name, request) = &requests[0];
        assert_eq!(name, RECIPE_EXTRACT_PROMPT_NAME);
        assert_eq!(request.messages[1].images, vec![jpeg()]);
        assert!(matches!(
            request.response_format,
            ResponseFormat::JsonSchema { .. }
        ));
    }

    #[tokio::test]
    async fn test_url_flow_includes_page_text() {
        let url = "https://example.com/carbonara";
        let http = MockClient::new().with_html(
            url,
            "<html><body><script>x()</script><p>500 g spaghetti</p></body></html>",
        );
        let ai = Arc::new(FakeAiClient::new().add_response("500 g spaghetti", CARBONARA));
        let extractor = extractor(ai.clone(), http);

        extractor.check_url(url).await.unwrap();
        let text = extractor.fetch_page_text(url).await;
        assert_eq!(text.as_deref(), Some("500 g spaghetti"));

        let content = extractor.from_url(url, text.as_deref()).await.unwrap();
        assert_eq!(content.servings, 4);
    }

    #[tokio::test]
    async fn test_page_fetch_failure_yields_none() {
        let url = "https://example.com/slow";
        let http = MockClient::new().with_response(url, MockResponse::ReachableOnly);
        let extractor = extractor(Arc::new(FakeAiClient::new()), http);

        assert!(extractor.check_url(url).await.is_ok());
        assert_eq!(extractor.fetch_page_text(url).await, None);
    }

    #[tokio::test]
    async fn test_client_error_propagates() {
        let ai = Arc::new(FakeAiClient::failing("upstream down"));
        let result = extractor(ai, MockClient::new()).from_image(&jpeg()).await;
        assert!(matches!(result, Err(AiError::Api(_))));
    }
}
