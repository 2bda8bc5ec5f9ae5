use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::{WithRejection, cookie::CookieJar};
use tracing::{debug, info};

use solace_types::api::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse, VerifyResponse,
};

use crate::AppState;
use crate::error::ApiError;
use crate::session::{cleared_cookie, session_cookie, token_from_request};

pub const MAX_USERNAME_LEN: usize = 32;
pub const MIN_PASSWORD_LEN: usize = 6;

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.trim().to_string();

    // Validate input
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(ApiError::validation(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LEN
        )));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if req
        .confirm_password
        .as_deref()
        .is_some_and(|confirm| confirm != req.password)
    {
        return Err(ApiError::validation("Passwords do not match"));
    }

    // Argon2 and the insert both block
    let password = req.password;
    let user = tokio::task::spawn_blocking(move || state.auth.register(&username, &password))
        .await??;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered".into(),
            user,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.trim().to_string();
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }

    let secure = state.secure_cookies;
    let max_age = state.auth.tokens().ttl();
    let password = req.password;
    let session = tokio::task::spawn_blocking(move || state.auth.login(&username, &password))
        .await??;

    info!("{} ({}) logged in", session.user.username, session.user.id);

    let jar = jar.add(session_cookie(session.token.clone(), secure, max_age));
    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".into(),
            user: session.user,
            token: session.token,
        }),
    ))
}

/// Tokens are stateless, so logging out only clears the client's cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(cleared_cookie(state.secure_cookies)),
        Json(MessageResponse {
            message: "Logged out".into(),
        }),
    )
}

pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let token = token_from_request(&headers, &jar)
        .ok_or_else(|| ApiError::unauthorized("No authentication token provided"))?;

    let user = tokio::task::spawn_blocking(move || state.auth.verify_token(&token)).await??;
    debug!("Verified session for {} ({})", user.username, user.id);

    Ok(Json(VerifyResponse { user }))
}
