use tracing::{debug, warn};

use crate::recipe_api::RecipeSource;

use super::criteria::SearchCriteria;
use super::filter;
use super::shape::{shape_recipe, Recipe};

/// The search-and-filter pipeline: search, enrich each summary with one
/// detail fetch, filter, shape. Search failures degrade to an empty list
/// and a failed detail fetch drops that item only; API order is preserved.
pub async fn find_recipes(source: &dyn RecipeSource, criteria: &SearchCriteria) -> Vec<Recipe> {
    let summaries = match source.search(criteria).await {
        Ok(summaries) => summaries,
        Err(e) => {
            warn!(error = %e, "recipe search failed, returning no results");
            return Vec::new();
        }
    };

    let mut recipes = Vec::new();
    for summary in summaries {
        let detail = match source.detail(summary.id).await {
            Ok(detail) => detail,
            Err(e) => {
                debug!(recipe_id = summary.id, error = %e, "detail fetch failed, dropping item");
                continue;
            }
        };
        if !filter::passes(&detail, criteria) {
            continue;
        }
        recipes.push(shape_recipe(&summary, &detail));
    }
    recipes
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::recipe_api::{
        Ingredient, RecipeApiError, RecipeDetail, RecipeSummary,
    };
    use crate::recipes::criteria::Diet;

    struct FakeSource {
        summaries: Vec<RecipeSummary>,
        details: HashMap<i64, RecipeDetail>,
        fail_search: bool,
        fail_details: HashSet<i64>,
    }

    impl FakeSource {
        fn new(summaries: Vec<RecipeSummary>, details: HashMap<i64, RecipeDetail>) -> Self {
            Self {
                summaries,
                details,
                fail_search: false,
                fail_details: HashSet::new(),
            }
        }
    }

    #[async_trait]
    impl RecipeSource for FakeSource {
        async fn search(
            &self,
            _criteria: &SearchCriteria,
        ) -> Result<Vec<RecipeSummary>, RecipeApiError> {
            if self.fail_search {
                return Err(RecipeApiError::Status(StatusCode::PAYMENT_REQUIRED));
            }
            Ok(self.summaries.clone())
        }

        async fn detail(&self, recipe_id: i64) -> Result<RecipeDetail, RecipeApiError> {
            if self.fail_details.contains(&recipe_id) {
                return Err(RecipeApiError::Status(StatusCode::NOT_FOUND));
            }
            self.details
                .get(&recipe_id)
                .cloned()
                .ok_or(RecipeApiError::Status(StatusCode::NOT_FOUND))
        }
    }

    fn summary(id: i64, title: &str) -> RecipeSummary {
        RecipeSummary {
            id,
            title: title.into(),
            image: String::new(),
        }
    }

    fn detail(title: &str, minutes: u32, ingredients: &[&str]) -> RecipeDetail {
        RecipeDetail {
            title: title.into(),
            ready_in_minutes: minutes,
            extended_ingredients: ingredients
                .iter()
                .map(|name| Ingredient {
                    name: (*name).into(),
                })
                .collect(),
            ..RecipeDetail::default()
        }
    }

    #[tokio::test]
    async fn failed_search_yields_empty_list() {
        let mut source = FakeSource::new(vec![summary(1, "a")], HashMap::new());
        source.fail_search = true;
        let recipes = find_recipes(&source, &SearchCriteria::default()).await;
        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn results_preserve_search_order() {
        let source = FakeSource::new(
            vec![summary(3, "c"), summary(1, "a"), summary(2, "b")],
            HashMap::from([
                (1, detail("a", 10, &[])),
                (2, detail("b", 10, &[])),
                (3, detail("c", 10, &[])),
            ]),
        );
        let recipes = find_recipes(&source, &SearchCriteria::default()).await;
        let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn failed_detail_fetch_drops_that_item_only() {
        let mut source = FakeSource::new(
            vec![summary(1, "a"), summary(2, "b"), summary(3, "c")],
            HashMap::from([
                (1, detail("a", 10, &[])),
                (3, detail("c", 10, &[])),
            ]),
        );
        source.fail_details.insert(2);
        let recipes = find_recipes(&source, &SearchCriteria::default()).await;
        let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn diet_filter_is_applied_to_enriched_details() {
        let source = FakeSource::new(
            vec![summary(1, "Fried Rice"), summary(2, "Garden Salad")],
            HashMap::from([
                (1, detail("Fried Rice", 15, &["rice", "egg"])),
                (2, detail("Garden Salad", 10, &["lettuce", "tomato"])),
            ]),
        );
        let criteria = SearchCriteria {
            diet: Some(Diet::Vegan),
            ..SearchCriteria::default()
        };
        let recipes = find_recipes(&source, &criteria).await;
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].id, 2);
    }

    #[tokio::test]
    async fn shaped_records_carry_summary_identity() {
        let source = FakeSource::new(
            vec![RecipeSummary {
                id: 42,
                title: "Tofu Stir Fry".into(),
                image: "https://img/42.jpg".into(),
            }],
            HashMap::from([(42, detail("Tofu Stir Fry", 25, &["tofu"]))]),
        );
        let recipes = find_recipes(&source, &SearchCriteria::default()).await;
        assert_eq!(recipes[0].title, "Tofu Stir Fry");
        assert_eq!(recipes[0].image, "https://img/42.jpg");
        assert_eq!(recipes[0].difficulty.as_str(), "Easy");
    }
}
