use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Form, Router,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::auth::repo::User;
use crate::state::AppState;
use crate::views::{self, HomePage};

use super::criteria::SearchCriteria;
use super::dto::{HomeQuery, SearchForm};
use super::services::find_recipes;
use super::shape::no_results_message;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home).post(search))
}

#[instrument(skip(state))]
async fn home(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<HomeQuery>,
) -> Html<String> {
    let username = resolve_username(&state, user_id).await;
    views::home_page(&HomePage {
        username,
        login_success: query.login.as_deref() == Some("1"),
        logout_success: query.logout.as_deref() == Some("1"),
        ..HomePage::default()
    })
}

#[instrument(skip(state, form))]
async fn search(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    let criteria = SearchCriteria::from_form(&form);
    let recipes = find_recipes(state.recipes.as_ref(), &criteria).await;
    let no_results = recipes.is_empty().then(|| no_results_message(&criteria));

    let username = resolve_username(&state, user_id).await;
    views::home_page(&HomePage {
        username,
        recipes,
        no_results,
        ..HomePage::default()
    })
}

async fn resolve_username(state: &AppState, user_id: Option<Uuid>) -> Option<String> {
    let user_id = user_id?;
    match User::username_by_id(&state.db, user_id).await {
        Ok(username) => username,
        Err(e) => {
            warn!(error = %e, %user_id, "username lookup failed");
            None
        }
    }
}
