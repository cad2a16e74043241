use crate::recipe_api::{Nutrient, RecipeDetail};

use super::criteria::{Diet, Difficulty, SearchCriteria};

// Keyword blocklists scanned as substrings of the title and of every
// ingredient name. Substring matching is intentional: it catches
// "chicken broth" and "buttermilk" at the cost of the odd false positive.
const MEAT_KEYWORDS: &[&str] = &["chicken", "beef", "pork", "bacon", "turkey", "ham", "lamb"];
const DAIRY_EGG_KEYWORDS: &[&str] = &["cheese", "egg", "milk", "butter", "yogurt", "cream", "honey"];

/// All four predicates must pass for a recipe to be kept.
pub fn passes(detail: &RecipeDetail, criteria: &SearchCriteria) -> bool {
    within_calories(detail, criteria.max_calories)
        && within_time(detail, criteria.max_time_minutes)
        && matches_difficulty(detail, criteria.difficulty)
        && matches_diet(detail, criteria.diet)
}

/// First nutrient entry named "Calories", if the API reported one.
pub fn calorie_entry(detail: &RecipeDetail) -> Option<&Nutrient> {
    detail.nutrition.nutrients.iter().find(|n| n.name == "Calories")
}

fn within_calories(detail: &RecipeDetail, max_calories: Option<u32>) -> bool {
    let Some(max) = max_calories else {
        return true;
    };
    // Missing data is not failing data: no calorie entry never rejects.
    match calorie_entry(detail) {
        Some(entry) => entry.amount <= f64::from(max),
        None => true,
    }
}

fn within_time(detail: &RecipeDetail, max_time_minutes: Option<u32>) -> bool {
    match max_time_minutes {
        Some(max) => detail.ready_in_minutes <= max,
        None => true,
    }
}

fn matches_difficulty(detail: &RecipeDetail, wanted: Option<Difficulty>) -> bool {
    match wanted {
        Some(wanted) => Difficulty::from_minutes(detail.ready_in_minutes) == wanted,
        None => true,
    }
}

fn matches_diet(detail: &RecipeDetail, diet: Option<Diet>) -> bool {
    let Some(diet) = diet else {
        return true;
    };
    let title = detail.title.to_lowercase();
    let ingredients: Vec<String> = detail
        .extended_ingredients
        .iter()
        .map(|i| i.name.to_lowercase())
        .collect();
    let appears = |word: &&str| title.contains(*word) || ingredients.iter().any(|i| i.contains(*word));

    match diet {
        Diet::Vegetarian => !MEAT_KEYWORDS.iter().any(appears),
        Diet::Vegan => !MEAT_KEYWORDS
            .iter()
            .chain(DAIRY_EGG_KEYWORDS.iter())
            .any(appears),
    }
}
