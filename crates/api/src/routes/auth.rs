use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth::{logout, refresh, request_otp, session, verify_otp};
use crate::state::AppState;

/// Sign-in flow under `/auth`. `logout` and `session` need a bearer token.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/otp", post(request_otp))
        .route("/verify", post(verify_otp))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/session", get(session))
}
