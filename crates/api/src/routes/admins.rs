//! Route definitions for the `/admins` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admins;
use crate::state::AppState;

/// Routes mounted at `/admins`.
///
/// ```text
/// GET /{id}/surveys   -> list_surveys (self only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/surveys", get(admins::list_surveys))
}
