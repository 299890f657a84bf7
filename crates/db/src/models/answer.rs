//! Stored answers joined with their questions and choices.

use sqlx::FromRow;
use survey_core::submission::{CloseAnswerRecord, OpenAnswerRecord, RespondentRecord};
use survey_core::types::DbId;

/// A `submissions` header row.
#[derive(Debug, Clone, FromRow)]
pub struct RespondentRow {
    pub respondent_id: DbId,
    pub respondent_name: String,
}

impl From<RespondentRow> for RespondentRecord {
    fn from(row: RespondentRow) -> Self {
        Self {
            respondent_id: row.respondent_id,
            name: row.respondent_name,
        }
    }
}

/// A `close_answers` row joined through choice and question.
#[derive(Debug, Clone, FromRow)]
pub struct CloseAnswerRow {
    pub respondent_id: DbId,
    pub respondent_name: String,
    pub question_id: DbId,
    pub question_title: String,
    pub position: i32,
    pub choice_id: DbId,
    pub choice_text: String,
    pub selected: bool,
}

impl From<CloseAnswerRow> for CloseAnswerRecord {
    fn from(row: CloseAnswerRow) -> Self {
        Self {
            respondent_id: row.respondent_id,
            respondent_name: row.respondent_name,
            question_id: row.question_id,
            question_title: row.question_title,
            position: row.position,
            choice_id: row.choice_id,
            choice_text: row.choice_text,
            selected: row.selected,
        }
    }
}

/// An `open_answers` row joined through question.
#[derive(Debug, Clone, FromRow)]
pub struct OpenAnswerRow {
    pub respondent_id: DbId,
    pub respondent_name: String,
    pub question_id: DbId,
    pub question_title: String,
    pub position: i32,
    pub text: String,
}

impl From<OpenAnswerRow> for OpenAnswerRecord {
    fn from(row: OpenAnswerRow) -> Self {
        Self {
            respondent_id: row.respondent_id,
            respondent_name: row.respondent_name,
            question_id: row.question_id,
            question_title: row.question_title,
            position: row.position,
            text: row.text,
        }
    }
}

/// All stored submissions to one survey, ready for regrouping.
#[derive(Debug, Clone, Default)]
pub struct SurveyAnswers {
    pub respondents: Vec<RespondentRecord>,
    pub close_answers: Vec<CloseAnswerRecord>,
    pub open_answers: Vec<OpenAnswerRecord>,
}
