pub mod admins;
pub mod health;
pub mod sessions;
pub mod surveys;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /sessions                      login (POST)
/// /sessions/current              current admin (GET), logout (DELETE)
///
/// /surveys                       list (public), create (auth)
/// /surveys/{id}                  assembled survey (public)
/// /surveys/{id}/submissions      submit (public), list (owner only)
///
/// /admins/{id}/surveys           owned surveys (self only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sessions", sessions::router())
        .nest("/surveys", surveys::router())
        .nest("/admins", admins::router())
}
