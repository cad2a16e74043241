use serde::Deserialize;

/// Denormalized snapshot posted by the results page when a recipe is
/// favorited; stored verbatim, never refreshed from the API.
#[derive(Debug, Deserialize)]
pub struct FavoriteForm {
    pub recipe_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub ready_in_minutes: i32,
    #[serde(default)]
    pub servings: String,
    #[serde(default)]
    pub nutrition: String,
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFavoriteForm {
    #[serde(default)]
    pub recipe_id: Option<i64>,
}
