use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;
use uuid::Uuid;

use super::session::{SessionKeys, SESSION_COOKIE};

/// Authenticated identity for the current request, resolved from the session
/// cookie or an `Authorization: Bearer` header.
///
/// Protected handlers take this as a parameter, which makes their auth
/// requirement part of the signature. Rejection is a redirect to the login
/// entry point, never a hard error.
pub struct SessionUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);

        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(e) => match e {},
        };

        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get(axum::http::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.strip_prefix("Bearer "))
                    .map(|v| v.to_string())
            })
            .ok_or_else(|| Redirect::to("/login"))?;

        match keys.verify(&token) {
            Ok(claims) => Ok(SessionUser(claims.sub)),
            Err(_) => {
                warn!("invalid or expired session token");
                Err(Redirect::to("/login"))
            }
        }
    }
}
