//! Handlers for `/surveys/{id}/submissions`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use survey_core::error::CoreError;
use survey_core::submission::{group_by_respondent, Submission, SubmissionDraft};
use survey_core::types::DbId;
use survey_core::validation::validate_submission;
use survey_db::repositories::{SubmissionRepo, SurveyRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::surveys::load_survey;
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub respondent_id: DbId,
}

/// POST /api/surveys/{id}/submissions
///
/// Validate a respondent's answers against the stored survey, then store
/// them and bump the survey's counter atomically. Every presented choice is
/// stored, unselected ones included. Nothing is written when validation
/// fails.
pub async fn submit(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Json(mut draft): Json<SubmissionDraft>,
) -> AppResult<impl IntoResponse> {
    draft.check_target(survey_id)?;

    let survey = load_survey(&state, survey_id).await?;
    validate_submission(&survey.questions, &draft)?;
    draft.fill_unselected(&survey);

    let respondent_id = SubmissionRepo::persist(&state.pool, survey_id, &draft).await?;

    tracing::info!(survey_id, respondent_id, "Submission received");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmissionReceipt { respondent_id },
        }),
    ))
}

/// GET /api/surveys/{id}/submissions
///
/// Every submission to a survey, one entry per respondent. Only the
/// survey's owner may read them.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(survey_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Submission>>>> {
    let survey = SurveyRepo::find_by_id(&state.pool, survey_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))?;

    if survey.admin_id != auth.admin_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the survey's owner can view its submissions".into(),
        )));
    }

    let rows = SubmissionRepo::load_rows(&state.pool, survey_id).await?;
    let submissions = group_by_respondent(rows.respondents, rows.close_answers, rows.open_answers);

    Ok(Json(DataResponse { data: submissions }))
}
