pub mod auth;
pub mod chat;
pub mod error;
pub mod session;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use solace_auth::AuthService;
use solace_companion::Dispatcher;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub auth: AuthService,
    pub dispatcher: Dispatcher,
    /// Mark the session cookie `Secure`. On in production.
    pub secure_cookies: bool,
}

/// All HTTP routes. Cross-cutting layers (CORS, tracing) are added by the
/// binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/verify", get(auth::verify))
        .route("/chat", post(chat::chat))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn health() -> &'static str {
    "ok"
}
