//! Handlers for the `/surveys` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use survey_core::assembly::{assemble_for_respondent, flatten_for_persistence, SurveyDraft};
use survey_core::error::CoreError;
use survey_core::survey::Survey;
use survey_core::types::DbId;
use survey_core::validation::validate_survey_draft;
use survey_db::repositories::SurveyRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::{Created, DataResponse};
use crate::state::AppState;

/// GET /api/surveys
///
/// Every published survey, for respondents to pick from.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let surveys = SurveyRepo::list_public(&state.pool).await?;
    Ok(Json(DataResponse { data: surveys }))
}

/// POST /api/surveys
///
/// Validate an authored survey and store it with all of its questions and
/// choices in one transaction.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Json(draft): Json<SurveyDraft>,
) -> AppResult<impl IntoResponse> {
    validate_survey_draft(&draft)?;

    let flat = flatten_for_persistence(&draft, auth.admin_id);
    let id = SurveyRepo::create(&state.pool, &flat).await?;

    tracing::info!(
        survey_id = id,
        admin_id = auth.admin_id,
        questions = flat.questions.len(),
        "Survey created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: Created { id } })))
}

/// GET /api/surveys/{id}
///
/// The survey as presented to respondents, questions in authored order.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Survey>>> {
    let survey = load_survey(&state, id).await?;
    Ok(Json(DataResponse { data: survey }))
}

/// Load and assemble a survey, or fail with 404.
pub(crate) async fn load_survey(state: &AppState, id: DbId) -> AppResult<Survey> {
    let records = SurveyRepo::load_records(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }))?;

    Ok(assemble_for_respondent(
        records.survey,
        records.questions,
        records.choices,
    )?)
}
