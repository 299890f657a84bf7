//! Handlers for `/admins/{id}/...`.

use axum::extract::{Path, State};
use axum::Json;
use survey_core::error::CoreError;
use survey_core::types::DbId;
use survey_db::models::survey::SurveyRow;
use survey_db::repositories::SurveyRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admins/{id}/surveys
///
/// The surveys an administrator owns, with submission counts. Callers may
/// only list their own.
pub async fn list_surveys(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(admin_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<SurveyRow>>>> {
    if admin_id != auth.admin_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Administrators can only list their own surveys".into(),
        )));
    }

    let surveys = SurveyRepo::list_by_admin(&state.pool, admin_id).await?;
    Ok(Json(DataResponse { data: surveys }))
}
