use axum::{
    extract::{FromRef, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::CookieJar;
use tracing::{error, info, instrument, warn};

use crate::state::AppState;
use crate::views::{self, HomePage, GENERIC_ERROR};

use super::dto::{LoginForm, RegisterForm};
use super::password::{hash_password, verify_password, MIN_PASSWORD_CHARS};
use super::repo::{CreateUserError, User};
use super::session::{removal_cookie, session_cookie, SessionKeys};

const LOGIN_FAILED: &str = "Invalid email or password.";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(show_register).post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

async fn show_register() -> Html<String> {
    views::register_page(None, None)
}

#[instrument(skip(state, form))]
async fn register(
    State(state): State<AppState>,
    Form(mut form): Form<RegisterForm>,
) -> Html<String> {
    form.username = form.username.trim().to_string();
    form.email = form.email.trim().to_lowercase();

    if !form.email.contains('@') {
        return views::register_page(Some("Invalid email address."), None);
    }
    if form.password.chars().count() < MIN_PASSWORD_CHARS {
        return views::register_page(Some("Password must be at least 8 characters."), None);
    }

    let hash = match hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "password hashing failed");
            return views::register_page(Some(GENERIC_ERROR), None);
        }
    };

    match User::create(&state.db, &form.username, &form.email, &hash).await {
        Ok(user) => {
            info!(user_id = %user.id, "user registered");
            views::register_page(None, Some("Registration successful! You can now log in."))
        }
        Err(CreateUserError::EmailTaken) => {
            warn!(email = %form.email, "registration conflict");
            views::register_page(Some("Email is already registered."), None)
        }
        Err(CreateUserError::UsernameTaken) => {
            warn!(username = %form.username, "registration conflict");
            views::register_page(Some("Username is already taken."), None)
        }
        Err(CreateUserError::Database(e)) => {
            error!(error = %e, "create user failed");
            views::register_page(Some(GENERIC_ERROR), None)
        }
    }
}

#[instrument(skip(state, jar, form))]
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(mut form): Form<LoginForm>,
) -> Response {
    form.email = form.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &form.email).await {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, "login lookup failed");
            return login_failure(GENERIC_ERROR, form.email);
        }
    };

    // Unknown email and wrong password take the same path so the
    // response never reveals which one it was.
    let Some(user) = user else {
        warn!(email = %form.email, "login unknown email");
        return login_failure(LOGIN_FAILED, form.email);
    };
    let verified = verify_password(&form.password, &user.password_hash).unwrap_or_else(|e| {
        error!(error = %e, "password verification failed");
        false
    });
    if !verified {
        warn!(user_id = %user.id, "login invalid password");
        return login_failure(LOGIN_FAILED, form.email);
    }

    let keys = SessionKeys::from_ref(&state);
    let token = match keys.issue(user.id) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "session token signing failed");
            return login_failure(GENERIC_ERROR, form.email);
        }
    };

    info!(user_id = %user.id, "user logged in");
    (jar.add(session_cookie(token)), Redirect::to("/?login=1")).into_response()
}

fn login_failure(message: &str, email: String) -> Response {
    views::home_page(&HomePage {
        login_error: Some(message.to_string()),
        email: Some(email),
        ..HomePage::default()
    })
    .into_response()
}

#[instrument(skip(jar))]
async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(removal_cookie()), Redirect::to("/?logout=1"))
}
