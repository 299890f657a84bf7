//! Route definitions for the `/surveys` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{submissions, surveys};
use crate::state::AppState;

/// Routes mounted at `/surveys`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create (requires auth)
/// GET    /{id}                -> get_by_id
/// POST   /{id}/submissions    -> submissions::submit
/// GET    /{id}/submissions    -> submissions::list (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(surveys::list).post(surveys::create))
        .route("/{id}", get(surveys::get_by_id))
        .route(
            "/{id}/submissions",
            get(submissions::list).post(submissions::submit),
        )
}
