use std::time::Duration;

use axum::extract::FromRef;
use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Cookie carrying the signed user-id token.
pub const SESSION_COOKIE: &str = "user_id";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// HMAC keys backing the signed identity cookie. Client-supplied identity
/// is never trusted without going through [`SessionKeys::verify`].
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(
            &state.config.session.secret,
            state.config.session.ttl_minutes,
        )
    }
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs(ttl_minutes.max(0) as u64 * 60),
        }
    }

    pub fn issue(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = SessionClaims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "session token issued");
        Ok(token)
    }

    /// Expired, tampered or otherwise invalid tokens all come back as None.
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        match decode::<SessionClaims>(token, &self.decoding, &Validation::default()) {
            Ok(data) => Some(data.claims.sub),
            Err(e) => {
                debug!(error = %e, "session token rejected");
                None
            }
        }
    }
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new("dev-secret", 60)
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id).expect("issue token");
        assert_eq!(keys.verify(&token), Some(user_id));
    }

    #[test]
    fn verify_rejects_token_signed_with_other_secret() {
        let token = SessionKeys::new("other-secret", 60)
            .issue(Uuid::new_v4())
            .expect("issue token");
        assert_eq!(keys().verify(&token), None);
    }

    #[test]
    fn verify_rejects_tampered_token() {
        let keys = keys();
        let mut token = keys.issue(Uuid::new_v4()).expect("issue token");
        token.pop();
        token.push('A');
        assert_eq!(keys.verify(&token), None);
    }

    #[test]
    fn verify_rejects_garbage() {
        assert_eq!(keys().verify("not-a-token"), None);
    }

    #[test]
    fn ttl_drives_the_expiry_claim() {
        let token = SessionKeys::new("dev-secret", 0)
            .issue(Uuid::new_v4())
            .expect("issue token");
        let mut validation = Validation::default();
        validation.validate_exp = false;
        let data = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret("dev-secret".as_bytes()),
            &validation,
        )
        .expect("decode claims");
        assert_eq!(data.claims.exp, data.claims.iat);
    }

    #[test]
    fn session_cookie_is_scoped_and_http_only() {
        let cookie = session_cookie("token".into());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
}
