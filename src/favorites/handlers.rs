use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use tracing::{error, instrument};

use crate::auth::extractors::CurrentUser;
use crate::state::AppState;
use crate::views;

use super::dto::{FavoriteForm, RemoveFavoriteForm};
use super::repo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/favorite", post(add_favorite))
        .route("/favorites", get(list_favorites))
        .route("/remove-favorite", post(remove_favorite))
}

#[instrument(skip(state, form))]
async fn add_favorite(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Form(form): Form<FavoriteForm>,
) -> Response {
    let Some(user_id) = user_id else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "error": "Not logged in"})),
        )
            .into_response();
    };

    match repo::insert(&state.db, user_id, &form).await {
        // A duplicate insert is ok=false with a 200, not an error.
        Ok(inserted) => Json(json!({"ok": inserted})).into_response(),
        Err(e) => {
            error!(error = %e, %user_id, recipe_id = form.recipe_id, "favorite insert failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"ok": false, "error": "Could not save favorite"})),
            )
                .into_response()
        }
    }
}

#[instrument(skip(state))]
async fn list_favorites(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Response {
    let Some(user_id) = user_id else {
        return Redirect::to("/").into_response();
    };

    match repo::list_by_user(&state.db, user_id).await {
        Ok(favorites) => views::favorites_page(&favorites).into_response(),
        Err(e) => {
            error!(error = %e, %user_id, "favorites listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                views::error_page(views::GENERIC_ERROR),
            )
                .into_response()
        }
    }
}

#[instrument(skip(state, form))]
async fn remove_favorite(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Form(form): Form<RemoveFavoriteForm>,
) -> Redirect {
    // Outcome is never surfaced; failures are logged and the browser
    // lands back on the favorites page either way.
    if let (Some(user_id), Some(recipe_id)) = (user_id, form.recipe_id) {
        if let Err(e) = repo::remove(&state.db, user_id, recipe_id).await {
            error!(error = %e, %user_id, recipe_id, "favorite removal failed");
        }
    }
    Redirect::to("/favorites")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> FavoriteForm {
        FavoriteForm {
            recipe_id: 42,
            title: "Tofu Stir Fry".into(),
            image: String::new(),
            difficulty: "Easy".into(),
            ready_in_minutes: 25,
            servings: "2".into(),
            nutrition: "300 kcal".into(),
            instructions: "<ol><li>Fry.</li></ol>".into(),
        }
    }

    #[tokio::test]
    async fn add_favorite_rejects_anonymous_with_401_json() {
        let state = AppState::fake();
        let response = add_favorite(
            axum::extract::State(state),
            CurrentUser(None),
            Form(snapshot()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn list_favorites_redirects_anonymous_home() {
        let state = AppState::fake();
        let response = list_favorites(axum::extract::State(state), CurrentUser(None))
            .await
            .into_response();
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()["location"], "/");
    }

    #[tokio::test]
    async fn remove_favorite_redirects_anonymous_to_favorites() {
        let state = AppState::fake();
        let response = remove_favorite(
            axum::extract::State(state),
            CurrentUser(None),
            Form(RemoveFavoriteForm { recipe_id: None }),
        )
        .await
        .into_response();
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()["location"], "/favorites");
    }
}
