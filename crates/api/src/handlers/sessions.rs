//! Handlers for the `/sessions` resource (login, current session, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use survey_core::error::CoreError;
use survey_db::models::admin::AdminInfo;
use survey_db::models::session::CreateSession;
use survey_db::repositories::{AdminRepo, SessionRepo};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const BAD_CREDENTIALS: &str = "Incorrect email and/or password.";

/// Request body for `POST /sessions`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// The administrator's email address.
    #[validate(email)]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub admin: AdminInfo,
}

/// POST /api/sessions
///
/// Authenticate with email + password and open a session.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    input
        .validate()
        .map_err(|_| AppError::Unprocessable("username must be an email address".into()))?;

    let admin = AdminRepo::find_by_email(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(BAD_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(admin_id = admin.id, "Rejected login with wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            BAD_CREDENTIALS.into(),
        )));
    }

    let jwt = &state.config.jwt;
    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            admin_id: admin.id,
            expires_at: Utc::now() + chrono::Duration::minutes(jwt.session_expiry_mins),
        },
    )
    .await?;

    let access_token = generate_access_token(admin.id, session.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(admin_id = admin.id, session_id = session.id, "Admin logged in");

    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token,
            expires_in: jwt.session_expiry_mins * 60,
            admin: AdminInfo::from(&admin),
        },
    }))
}

/// GET /api/sessions/current
///
/// Return the administrator behind the current session.
pub async fn current(
    State(state): State<AppState>,
    auth: AuthAdmin,
) -> AppResult<Json<DataResponse<AdminInfo>>> {
    let admin = AdminRepo::find_by_id(&state.pool, auth.admin_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Administrator no longer exists".into()))
        })?;

    Ok(Json(DataResponse {
        data: AdminInfo::from(&admin),
    }))
}

/// DELETE /api/sessions/current
///
/// Revoke the current session. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthAdmin) -> AppResult<StatusCode> {
    SessionRepo::revoke(&state.pool, auth.session_id).await?;
    tracing::info!(admin_id = auth.admin_id, session_id = auth.session_id, "Admin logged out");
    Ok(StatusCode::NO_CONTENT)
}
