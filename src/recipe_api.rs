use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::RecipeApiConfig;
use crate::recipes::criteria::SearchCriteria;

/// Result cap requested from the search endpoint.
const SEARCH_PAGE_SIZE: &str = "20";

#[derive(Debug, Error)]
pub enum RecipeApiError {
    #[error("recipe api returned status {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Minimal identity fields returned by the search call, in API order.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RecipeSummary>,
}

/// Per-recipe detail payload. Every optional field defaults so a sparse
/// API response still decodes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ready_in_minutes: u32,
    #[serde(default)]
    pub servings: Option<serde_json::Value>,
    #[serde(default)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub analyzed_instructions: Vec<InstructionGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstructionGroup {
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstructionStep {
    pub step: String,
}

#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria)
        -> Result<Vec<RecipeSummary>, RecipeApiError>;
    async fn detail(&self, recipe_id: i64) -> Result<RecipeDetail, RecipeApiError>;
}

/// Spoonacular-backed implementation of [`RecipeSource`].
pub struct SpoonacularClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SpoonacularClient {
    pub fn new(config: &RecipeApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    async fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RecipeSummary>, RecipeApiError> {
        let url = format!("{}/recipes/complexSearch", self.base_url);
        let mut request = self.client.get(&url).query(&[
            ("apiKey", self.api_key.as_str()),
            ("number", SEARCH_PAGE_SIZE),
            ("addRecipeInformation", "true"),
            ("fillIngredients", "true"),
        ]);
        if let Some(ingredients) = &criteria.ingredients {
            request = request.query(&[("query", ingredients.as_str())]);
        }
        if let Some(diet) = criteria.diet {
            request = request.query(&[("diet", diet.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(RecipeApiError::Status(response.status()));
        }
        let body: SearchResponse = response.json().await?;
        debug!(results = body.results.len(), "recipe search succeeded");
        Ok(body.results)
    }

    async fn detail(&self, recipe_id: i64) -> Result<RecipeDetail, RecipeApiError> {
        let url = format!("{}/recipes/{}/information", self.base_url, recipe_id);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("includeNutrition", "true"),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RecipeApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_decodes_results_in_order() {
        let body = r#"{"results":[
            {"id": 7, "title": "Tofu Stir Fry", "image": "https://img/7.jpg"},
            {"id": 3, "title": "Lentil Soup"}
        ],"offset":0,"number":2}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].id, 7);
        assert_eq!(parsed.results[1].title, "Lentil Soup");
        assert_eq!(parsed.results[1].image, "");
    }

    #[test]
    fn search_response_without_results_decodes_empty() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"offset":0}"#).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn detail_decodes_with_every_field_missing() {
        let detail: RecipeDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(detail.ready_in_minutes, 0);
        assert!(detail.servings.is_none());
        assert!(detail.nutrition.nutrients.is_empty());
        assert!(detail.extended_ingredients.is_empty());
        assert!(detail.instructions.is_none());
        assert!(detail.analyzed_instructions.is_empty());
    }

    #[test]
    fn detail_decodes_nutrition_and_steps() {
        let body = r#"{
            "title": "Tofu Stir Fry",
            "readyInMinutes": 45,
            "servings": 4,
            "nutrition": {"nutrients": [
                {"name": "Calories", "amount": 512.3, "unit": "kcal"},
                {"name": "Fat", "amount": 12.0, "unit": "g"}
            ]},
            "extendedIngredients": [{"name": "tofu"}, {"name": "soy sauce"}],
            "analyzedInstructions": [{"steps": [{"number": 1, "step": "Press the tofu."}]}]
        }"#;
        let detail: RecipeDetail = serde_json::from_str(body).unwrap();
        assert_eq!(detail.ready_in_minutes, 45);
        assert_eq!(detail.nutrition.nutrients[0].name, "Calories");
        assert_eq!(detail.extended_ingredients[1].name, "soy sauce");
        assert_eq!(
            detail.analyzed_instructions[0].steps[0].step,
            "Press the tofu."
        );
    }
}
