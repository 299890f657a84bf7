//! Survey, question and choice rows.

use serde::Serialize;
use sqlx::FromRow;
use survey_core::assembly::{ChoiceRecord, QuestionRecord, SurveyRecord};
use survey_core::types::{DbId, Timestamp};

/// Full row from the `surveys` table, as listed to the owning administrator.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SurveyRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub admin_id: DbId,
    pub submission_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SurveyRow> for SurveyRecord {
    fn from(row: SurveyRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            admin_id: row.admin_id,
            submission_count: row.submission_count,
        }
    }
}

/// Public listing entry; omits the submission count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicSurvey {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub admin_id: DbId,
}

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: DbId,
    pub survey_id: DbId,
    pub title: String,
    pub min: i32,
    pub max: i32,
    pub position: i32,
}

impl From<QuestionRow> for QuestionRecord {
    fn from(row: QuestionRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            min: row.min,
            max: row.max,
            position: row.position,
        }
    }
}

/// A row from the `choices` table.
#[derive(Debug, Clone, FromRow)]
pub struct ChoiceRow {
    pub id: DbId,
    pub question_id: DbId,
    pub text: String,
}

impl From<ChoiceRow> for ChoiceRecord {
    fn from(row: ChoiceRow) -> Self {
        Self {
            id: row.id,
            question_id: row.question_id,
            text: row.text,
        }
    }
}

/// Everything the assembler needs to build one survey.
#[derive(Debug, Clone)]
pub struct SurveyRecords {
    pub survey: SurveyRecord,
    pub questions: Vec<QuestionRecord>,
    pub choices: Vec<ChoiceRecord>,
}
