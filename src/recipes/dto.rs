use serde::Deserialize;

/// Raw search form exactly as the browser submits it; normalization
/// happens in [`super::criteria::SearchCriteria::from_form`].
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub diet: String,
    #[serde(default)]
    pub max_calories: String,
    #[serde(default)]
    pub max_time: String,
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub logout: Option<String>,
}
