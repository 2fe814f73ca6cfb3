use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
        extractors::SessionUser,
        password::{hash_password, verify_password},
        repo::User,
        session::{removal_cookie, session_cookie, SessionKeys},
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/login", get(login_notice))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let new_user = payload.validate()?;

    if User::find_by_username_or_email(&state.db, &new_user.username, &new_user.email)
        .await?
        .is_some()
    {
        warn!(username = %new_user.username, "username or email already registered");
        return Err(ApiError::DuplicateCredential);
    }

    let hash = hash_password(&new_user.password)?;
    let user = User::create(&state.db, &new_user.username, &new_user.email, &hash).await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let username = payload.username.trim();

    // Unknown user and wrong password produce the same error on purpose.
    let user = User::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| {
            warn!(username = %username, "login unknown username");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = SessionKeys::from_ref(&state);
    let token = keys.sign_session(user.id)?;
    let jar = jar.add(session_cookie(token.clone(), keys.ttl));

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok((
        jar,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(removal_cookie());
    info!("session terminated");
    (jar, StatusCode::NO_CONTENT)
}

/// Target of the unauthenticated redirect.
pub async fn login_notice() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "authentication required, please log in" })),
    )
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> ApiResult<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "session references missing user");
            ApiError::InvalidCredentials
        })?;
    Ok(Json(user.into()))
}
