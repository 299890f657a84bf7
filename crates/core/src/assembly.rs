//! Survey assembly: flat persisted rows to a [`Survey`] aggregate, and an
//! authored [`SurveyDraft`] to flat rows ready for insertion.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CoreError;
use crate::survey::{Choice, Question, QuestionKind, Survey};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Persisted rows
// ---------------------------------------------------------------------------

/// A row of the `surveys` table.
#[derive(Debug, Clone)]
pub struct SurveyRecord {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub admin_id: DbId,
    pub submission_count: i64,
}

/// A row of the `questions` table, still in storage encoding.
#[derive(Debug, Clone)]
pub struct QuestionRecord {
    pub id: DbId,
    pub title: String,
    pub min: i32,
    pub max: i32,
    pub position: i32,
}

/// A row of the `choices` table.
#[derive(Debug, Clone)]
pub struct ChoiceRecord {
    pub id: DbId,
    pub question_id: DbId,
    pub text: String,
}

/// Build the respondent-facing survey from its persisted rows.
///
/// Questions are ordered by `position` (ties broken by id). Choice questions
/// receive their choices in id order; open questions receive none. A survey
/// without questions assembles to an empty question list. Rows whose bounds
/// cannot be decoded are reported as [`CoreError::Internal`], since authoring
/// validation never lets them in.
pub fn assemble_for_respondent(
    survey: SurveyRecord,
    mut questions: Vec<QuestionRecord>,
    mut choices: Vec<ChoiceRecord>,
) -> Result<Survey, CoreError> {
    choices.sort_by_key(|c| c.id);
    let mut choices_by_question: HashMap<DbId, Vec<Choice>> = HashMap::new();
    for choice in choices {
        choices_by_question
            .entry(choice.question_id)
            .or_default()
            .push(Choice {
                id: choice.id,
                text: choice.text,
            });
    }

    questions.sort_by_key(|q| (q.position, q.id));
    let questions = questions
        .into_iter()
        .map(|q| {
            let choices = choices_by_question.remove(&q.id).unwrap_or_default();
            let kind = QuestionKind::from_bounds(q.min, q.max, choices).ok_or_else(|| {
                CoreError::Internal(format!(
                    "Question {} has inconsistent bounds (min {}, max {})",
                    q.id, q.min, q.max
                ))
            })?;
            Ok(Question {
                id: q.id,
                title: q.title,
                position: q.position,
                kind,
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    Ok(Survey {
        id: survey.id,
        title: survey.title,
        description: survey.description,
        admin_id: survey.admin_id,
        submission_count: survey.submission_count,
        questions,
    })
}

// ---------------------------------------------------------------------------
// Authored drafts
// ---------------------------------------------------------------------------

/// A survey as submitted by its author.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

/// One authored question in storage encoding (`max == 0` for open text).
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDraft {
    #[serde(alias = "titleQuestion")]
    pub title: String,
    pub min: i32,
    pub max: i32,
    /// Choice texts; ignored for open questions.
    #[serde(default, alias = "content")]
    pub choices: Vec<String>,
    /// Caller-supplied position. Always overwritten by the authored order.
    #[serde(default)]
    pub position: Option<i32>,
}

impl From<&Survey> for SurveyDraft {
    fn from(survey: &Survey) -> Self {
        Self {
            title: survey.title.clone(),
            description: survey.description.clone(),
            questions: survey
                .questions
                .iter()
                .map(|q| {
                    let (min, max) = q.kind.bounds();
                    QuestionDraft {
                        title: q.title.clone(),
                        min,
                        max,
                        choices: q.kind.choices().iter().map(|c| c.text.clone()).collect(),
                        position: Some(q.position),
                    }
                })
                .collect(),
        }
    }
}

/// The `surveys` row of a flattened draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSurvey {
    pub title: String,
    pub description: Option<String>,
    pub admin_id: DbId,
}

/// A `questions` row of a flattened draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub title: String,
    pub min: i32,
    pub max: i32,
    pub position: i32,
}

/// A `choices` row of a flattened draft. The owning question is identified
/// by its position, since question ids only exist after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChoice {
    pub question_position: i32,
    pub text: String,
}

/// A draft flattened into insertable rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSurvey {
    pub survey: NewSurvey,
    pub questions: Vec<NewQuestion>,
    pub choices: Vec<NewChoice>,
}

/// Flatten an authored draft into rows for persistence.
///
/// Positions are the index in the authored sequence. Choice rows are emitted
/// only for choice questions (`max >= 1`), in authored order. A blank
/// description is stored as `NULL`. Validate the draft first; this function
/// does not reject anything.
pub fn flatten_for_persistence(draft: &SurveyDraft, admin_id: DbId) -> FlatSurvey {
    let mut questions = Vec::with_capacity(draft.questions.len());
    let mut choices = Vec::new();

    for (index, question) in draft.questions.iter().enumerate() {
        let position = index as i32;
        questions.push(NewQuestion {
            title: question.title.clone(),
            min: question.min,
            max: question.max,
            position,
        });
        if question.max >= 1 {
            choices.extend(question.choices.iter().map(|text| NewChoice {
                question_position: position,
                text: text.clone(),
            }));
        }
    }

    FlatSurvey {
        survey: NewSurvey {
            title: draft.title.clone(),
            description: draft
                .description
                .clone()
                .filter(|d| !d.trim().is_empty()),
            admin_id,
        },
        questions,
        choices,
    }
}
