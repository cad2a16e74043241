use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use super::session::{SessionKeys, SESSION_COOKIE};

/// Optional identity: carries a user id only when the session cookie is
/// present and its signature verifies. Handlers decide what an anonymous
/// request means for them, so extraction itself never rejects.
pub struct CurrentUser(pub Option<Uuid>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state).await?;
        let keys = SessionKeys::from_ref(state);
        let user_id = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| keys.verify(cookie.value()));
        Ok(CurrentUser(user_id))
    }
}
