use serde_json::Value;

use crate::recipe_api::{RecipeDetail, RecipeSummary};
use crate::views::escape;

use super::criteria::{Difficulty, SearchCriteria};
use super::filter::calorie_entry;

pub const NUTRITION_MISSING: &str = "Information missing";
pub const NO_INSTRUCTIONS: &str = "No instructions provided.";

/// Display-ready recipe record; the only shape the presentation layer
/// and the favorites snapshot ever see.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: u32,
    pub servings: String,
    pub nutrition: String,
    pub difficulty: Difficulty,
    pub instructions: String,
}

pub fn shape_recipe(summary: &RecipeSummary, detail: &RecipeDetail) -> Recipe {
    Recipe {
        id: summary.id,
        title: summary.title.clone(),
        image: summary.image.clone(),
        ready_in_minutes: detail.ready_in_minutes,
        servings: servings_display(detail.servings.as_ref()),
        nutrition: nutrition_display(detail),
        difficulty: Difficulty::from_minutes(detail.ready_in_minutes),
        instructions: instructions_html(detail),
    }
}

fn nutrition_display(detail: &RecipeDetail) -> String {
    match calorie_entry(detail) {
        Some(entry) => format!("{} {}", entry.amount, entry.unit),
        None => NUTRITION_MISSING.to_string(),
    }
}

fn servings_display(servings: Option<&Value>) -> String {
    match servings {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => "Unknown".to_string(),
    }
}

/// Ordered list from the first analyzed-instruction group; falls back to
/// the free-text instructions field, then to a fixed sentinel.
fn instructions_html(detail: &RecipeDetail) -> String {
    if let Some(group) = detail.analyzed_instructions.first() {
        if !group.steps.is_empty() {
            let items: String = group
                .steps
                .iter()
                .map(|s| format!("<li>{}</li>", escape(&s.step)))
                .collect();
            return format!("<ol>{items}</ol>");
        }
    }
    match detail.instructions.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => NO_INSTRUCTIONS.to_string(),
    }
}

/// Human-readable summary of which constraints were actually supplied.
pub fn no_results_message(criteria: &SearchCriteria) -> String {
    let mut parts = Vec::new();
    if let Some(ingredients) = &criteria.ingredients {
        parts.push(format!("ingredient '{ingredients}'"));
    }
    if let Some(diet) = criteria.diet {
        parts.push(format!("diet '{}'", diet.as_str()));
    }
    if let Some(kcal) = criteria.max_calories {
        parts.push(format!("max {kcal} kcal"));
    }
    if let Some(minutes) = criteria.max_time_minutes {
        parts.push(format!("max {minutes} min"));
    }
    if let Some(difficulty) = criteria.difficulty {
        parts.push(format!("difficulty '{difficulty}'"));
    }

    if parts.is_empty() {
        "No recipes found.".to_string()
    } else {
        format!("No recipes found matching {}.", parts.join(", "))
    }
}
