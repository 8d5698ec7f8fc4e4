//! AI prompt templates.

pub mod recipe_extract;

pub use recipe_extract::{
    recipe_json_schema, render_image_prompt, render_system_prompt, render_url_prompt,
    RECIPE_EXTRACT_PROMPT_NAME, RECIPE_SCHEMA_NAME,
};
