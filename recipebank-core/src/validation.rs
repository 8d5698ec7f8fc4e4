//! Structural checks a recipe must pass before it is persisted.

use thiserror::Error;

use crate::types::RecipeContent;

/// Text fields count as missing or empty when they contain only whitespace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,

    #[error("at least one ingredient is required")]
    NoIngredients,

    #[error("ingredients[{index}]: name is required")]
    MissingIngredientName { index: usize },

    #[error("ingredients[{index}]: quantity must not be negative")]
    NegativeQuantity { index: usize },

    #[error("at least one step is required")]
    NoSteps,

    #[error("steps[{index}]: step must not be empty")]
    EmptyStep { index: usize },

    #[error("cook_time must be greater than 0")]
    InvalidCookTime,

    #[error("servings must be greater than 0")]
    InvalidServings,
}

/// Check a recipe's structural invariants, reporting the first violation found.
///
/// Title, ingredient names and steps are trimmed before the emptiness check, so `"  "`
/// is rejected the same way as `""`. Ingredient quantities may be zero ("salt to taste");
/// negative or NaN quantities are not.
pub fn validate_recipe(recipe: &RecipeContent) -> Result<(), ValidationError> {
    if recipe.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }

    if recipe.ingredients.is_empty() {
        return Err(ValidationError::NoIngredients);
    }

    for (index, ingredient) in recipe.ingredients.iter().enumerate() {
        if ingredient.name.trim().is_empty() {
            return Err(ValidationError::MissingIngredientName { index });
        }
        // Written this way round so NaN is rejected too
        if !(ingredient.quantity >= 0.0) {
            return Err(ValidationError::NegativeQuantity { index });
        }
    }

    if recipe.steps.is_empty() {
        return Err(ValidationError::NoSteps);
    }

    if let Some(index) = recipe.steps.iter().position(|s| s.trim().is_empty()) {
        return Err(ValidationError::EmptyStep { index });
    }

    if recipe.cook_time <= 0 {
        return Err(ValidationError::InvalidCookTime);
    }

    if recipe.servings <= 0 {
        return Err(ValidationError::InvalidServings);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ingredient;

    fn valid_recipe() -> RecipeContent {
        RecipeContent {
            title: "Pancakes".to_string(),
            description: String::new(),
            ingredients: vec![Ingredient {
                name: "Flour".to_string(),
                quantity: 1.0,
                unit: "cup".to_string(),
            }],
            steps: vec!["Mix".to_string(), "Fry".to_string()],
            cook_time: 10,
            servings: 2,
            tags: vec![],
        }
    }

    #[test]
    fn test_valid_recipe_passes() {
        assert_eq!(validate_recipe(&valid_recipe()), Ok(()));
    }

    #[test]
    fn test_empty_description_and_tags_allowed() {
        let recipe = RecipeContent {
            description: String::new(),
            tags: vec![],
            ..valid_recipe()
        };
        assert!(validate_recipe(&recipe).is_ok());
    }

    #[test]
    fn test_empty_title() {
        let recipe = RecipeContent {
            title: "   ".to_string(),
            ..valid_recipe()
        };
        assert_eq!(validate_recipe(&recipe), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn test_no_ingredients() {
        let recipe = RecipeContent {
            ingredients: vec![],
            ..valid_recipe()
        };
        assert_eq!(validate_recipe(&recipe), Err(ValidationError::NoIngredients));
    }

    #[test]
    fn test_ingredient_without_name_reports_index() {
        let mut recipe = valid_recipe();
        recipe.ingredients.push(Ingredient {
            name: String::new(),
            quantity: 2.0,
            unit: "tbsp".to_string(),
        });
        let err = validate_recipe(&recipe).unwrap_err();
        assert_eq!(err, ValidationError::MissingIngredientName { index: 1 });
        assert_eq!(err.to_string(), "ingredients[1]: name is required");
    }

    #[test]
    fn test_zero_quantity_allowed() {
        let mut recipe = valid_recipe();
        recipe.ingredients.push(Ingredient {
            name: "Salt".to_string(),
            quantity: 0.0,
            unit: String::new(),
        });
        assert!(validate_recipe(&recipe).is_ok());
    }

    #[test]
    fn test_negative_quantity() {
        let mut recipe = valid_recipe();
        recipe.ingredients[0].quantity = -1.0;
        assert_eq!(
            validate_recipe(&recipe),
            Err(ValidationError::NegativeQuantity { index: 0 })
        );
    }

    #[test]
    fn test_nan_quantity() {
        let mut recipe = valid_recipe();
        recipe.ingredients[0].quantity = f64::NAN;
        assert!(validate_recipe(&recipe).is_err());
    }

    #[test]
    fn test_no_steps() {
        let recipe = RecipeContent {
            steps: vec![],
            ..valid_recipe()
        };
        assert_eq!(validate_recipe(&recipe), Err(ValidationError::NoSteps));
    }

    #[test]
    fn test_empty_step() {
        let recipe = RecipeContent {
            steps: vec!["Mix".to_string(), String::new()],
            ..valid_recipe()
        };
        assert_eq!(
            validate_recipe(&recipe),
            Err(ValidationError::EmptyStep { index: 1 })
        );
    }

    #[test]
    fn test_whitespace_only_name_and_step_are_empty() {
        let mut recipe = valid_recipe();
        recipe.ingredients[0].name = " \t ".to_string();
        assert_eq!(
            validate_recipe(&recipe),
            Err(ValidationError::MissingIngredientName { index: 0 })
        );

        let recipe = RecipeContent {
            steps: vec!["\n".to_string()],
            ..valid_recipe()
        };
        assert_eq!(
            validate_recipe(&recipe),
            Err(ValidationError::EmptyStep { index: 0 })
        );
    }

    #[test]
    fn test_cook_time_must_be_positive() {
        for cook_time in [0, -5] {
            let recipe = RecipeContent {
                cook_time,
                ..valid_recipe()
            };
            assert_eq!(
                validate_recipe(&recipe),
                Err(ValidationError::InvalidCookTime)
            );
        }
    }

    #[test]
    fn test_servings_must_be_positive() {
        let recipe = RecipeContent {
            servings: 0,
            ..valid_recipe()
        };
        assert_eq!(
            validate_recipe(&recipe),
            Err(ValidationError::InvalidServings)
        );
    }

    #[test]
    fn test_first_violation_wins() {
        let recipe = RecipeContent {
            title: String::new(),
            steps: vec![],
            servings: 0,
            ..valid_recipe()
        };
        assert_eq!(validate_recipe(&recipe), Err(ValidationError::MissingTitle));
    }
}
