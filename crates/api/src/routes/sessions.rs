//! Route definitions for the `/sessions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// POST   /          -> login
/// GET    /current   -> current (requires auth)
/// DELETE /current   -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::login))
        .route("/current", get(sessions::current).delete(sessions::logout))
}
