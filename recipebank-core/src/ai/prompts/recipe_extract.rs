//! Prompt templates and response schema for extracting a structured recipe.

use serde_json::{json, Value};

pub const RECIPE_EXTRACT_PROMPT_NAME: &str = "recipe_extract";

pub const RECIPE_SCHEMA_NAME: &str = "recipe";

pub fn render_system_prompt() -> String {
    r#"You are a recipe extraction assistant. You turn recipe photos and web pages into structured recipe data.

Return a JSON object with this exact structure:
{
  "title": "Spaghetti Carbonara",
  "description": "A classic Italian pasta dish with eggs, cheese, and pancetta",
  "ingredients": [
    {"name": "spaghetti", "quantity": 500, "unit": "g"},
    {"name": "salt", "quantity": 0, "unit": ""}
  ],
  "steps": [
    "Boil the pasta in salted water until al dente",
    "Fry the pancetta until crispy"
  ],
  "cook_time": 25,
  "servings": 4
}

Rules:
- Use the language of the source recipe
- Each ingredient gets its own entry; use quantity 0 and an empty unit when no amount is given
- Convert fractions to decimals (1/2 becomes 0.5)
- Each step is one instruction, without numbering
- cook_time is the total time in minutes; estimate it if the source does not say
- servings is a whole number; estimate it if the source does not say
- Return ONLY the JSON, no other text"#
        .to_string()
}

pub fn render_image_prompt() -> String {
    "Extract the recipe shown in this image.".to_string()
}

/// `page_text` is the visible text of the page, when it could be downloaded.
pub fn render_url_prompt(url: &str, page_text: Option<&str>) -> String {
    match page_text {
        Some(text) if !text.is_empty() => format!(
            "Extract the recipe from this web page.\n\nURL: {}\n\nPage content:\n{}",
            url, text
        ),
        _ => format!("Extract the recipe from this web page.\n\nURL: {}", url),
    }
}

/// Strict JSON schema for the model's answer. Strict mode requires every property to be
/// listed as required and extra properties to be forbidden.
pub fn recipe_json_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": {"type": "string"},
            "description": {"type": "string"},
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "quantity": {"type": "number"},
                        "unit": {"type": "string"}
                    },
                    "required": ["name", "quantity", "unit"],
                    "additionalProperties": false
                }
            },
            "steps": {
                "type": "array",
                "items": {"type": "string"}
            },
            "cook_time": {"type": "integer"},
            "servings": {"type": "integer"}
        },
        "required": ["title", "description", "ingredients", "steps", "cook_time", "servings"],
        "additionalProperties": false
    })
}
