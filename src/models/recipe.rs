//! Recipe model and its HTTP shapes

use serde::{Deserialize, Serialize};

/// A user submitted recipe scoped to one city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u64,
    pub content: String,
    pub city_id: String,
}

/// Public view of a recipe, without its city scope
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeView {
    pub id: u64,
    pub content: String,
}

impl From<&Recipe> for RecipeView {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            content: recipe.content.clone(),
        }
    }
}

impl From<Recipe> for RecipeView {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            content: recipe.content,
        }
    }
}

/// Body of `POST /cities/{cityId}/recipes`
#[derive(Debug, Deserialize, Default)]
pub struct CreateRecipeRequest {
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_view_drops_city() {
        let recipe = Recipe {
            id: 3,
            content: "Slow cooked ratatouille".to_string(),
            city_id: "paris".to_string(),
        };

        let value = serde_json::to_value(RecipeView::from(&recipe)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "id": 3, "content": "Slow cooked ratatouille" })
        );
    }

    #[test]
    fn test_create_request_content_is_optional() {
        let request: CreateRecipeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.content.is_none());
    }
}
