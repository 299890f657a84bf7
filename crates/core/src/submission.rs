//! Respondent submissions.
//!
//! [`SubmissionDraft`] is what a respondent posts. Stored answers come back as
//! as submission headers plus flat per-choice / per-open-answer records;
//! [`group_by_respondent`] folds them into one [`Submission`] per respondent
//! for review.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::survey::Survey;
use crate::types::DbId;
use crate::validation::ValidationError;

// ---------------------------------------------------------------------------
// Incoming
// ---------------------------------------------------------------------------

/// A respondent's answers to one survey, as posted.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionDraft {
    /// Optional echo of the target survey; must match the URL when present.
    #[serde(default, alias = "surveyID")]
    pub survey_id: Option<DbId>,
    pub name: String,
    #[serde(default, alias = "openAnswers")]
    pub open_answers: Vec<OpenAnswer>,
    /// One entry per presented choice, selected or not.
    #[serde(default, alias = "closeAnswers")]
    pub close_answers: Vec<CloseAnswer>,
}

impl SubmissionDraft {
    /// Reject a body that names a different survey than the one it was posted to.
    pub fn check_target(&self, survey_id: DbId) -> Result<(), ValidationError> {
        match self.survey_id {
            Some(actual) if actual != survey_id => Err(ValidationError::SurveyMismatch {
                expected: survey_id,
                actual,
            }),
            _ => Ok(()),
        }
    }

    /// Add an unselected entry for every presented choice the respondent
    /// left out, so each choice question is stored with its full choice set.
    pub fn fill_unselected(&mut self, survey: &Survey) {
        for question in &survey.questions {
            for choice in question.kind.choices() {
                if !self.close_answers.iter().any(|a| a.choice_id == choice.id) {
                    self.close_answers.push(CloseAnswer {
                        question_id: question.id,
                        choice_id: choice.id,
                        value: 0,
                    });
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAnswer {
    #[serde(alias = "questionID")]
    pub question_id: DbId,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseAnswer {
    #[serde(alias = "questionID")]
    pub question_id: DbId,
    #[serde(alias = "choiceID")]
    pub choice_id: DbId,
    /// `1` when selected, `0` otherwise.
    pub value: i64,
}

impl CloseAnswer {
    pub fn is_selected(&self) -> bool {
        self.value == 1
    }
}

// ---------------------------------------------------------------------------
// Stored records
// ---------------------------------------------------------------------------

/// A stored submission header.
#[derive(Debug, Clone)]
pub struct RespondentRecord {
    pub respondent_id: DbId,
    pub name: String,
}

/// One stored close answer joined with its question and choice.
#[derive(Debug, Clone)]
pub struct CloseAnswerRecord {
    pub respondent_id: DbId,
    pub respondent_name: String,
    pub question_id: DbId,
    pub question_title: String,
    pub position: i32,
    pub choice_id: DbId,
    pub choice_text: String,
    pub selected: bool,
}

/// One stored open answer joined with its question.
#[derive(Debug, Clone)]
pub struct OpenAnswerRecord {
    pub respondent_id: DbId,
    pub respondent_name: String,
    pub question_id: DbId,
    pub question_title: String,
    pub position: i32,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Reconciled view
// ---------------------------------------------------------------------------

/// One respondent's complete set of answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub respondent_id: DbId,
    pub name: String,
    pub questions: Vec<AnsweredQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredQuestion {
    pub question_id: DbId,
    pub title: String,
    pub position: i32,
    #[serde(flatten)]
    pub answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Answer {
    Open { text: String },
    /// Every presented choice, ordered by choice id.
    Choice { content: Vec<AnsweredChoice> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredChoice {
    pub choice_id: DbId,
    pub text: String,
    pub selected: bool,
}

struct RespondentAnswers {
    name: String,
    questions: BTreeMap<DbId, AnsweredQuestion>,
}

/// Regroup flat answer records into one submission per respondent.
///
/// Every header in `respondents` yields a submission, even one without any
/// stored answers. Close-answer records sharing a question id merge into one choice answer
/// whose content is ordered by choice id. Open-answer records become open
/// answers. Each submission's questions are ordered by `position`, across
/// both kinds, so the review shows the survey's authored order. Submissions
/// are ordered by respondent id.
pub fn group_by_respondent(
    headers: Vec<RespondentRecord>,
    close_answers: Vec<CloseAnswerRecord>,
    open_answers: Vec<OpenAnswerRecord>,
) -> Vec<Submission> {
    let mut respondents: BTreeMap<DbId, RespondentAnswers> = headers
        .into_iter()
        .map(|header| {
            (
                header.respondent_id,
                RespondentAnswers {
                    name: header.name,
                    questions: BTreeMap::new(),
                },
            )
        })
        .collect();

    for record in close_answers {
        let respondent = respondents
            .entry(record.respondent_id)
            .or_insert_with(|| RespondentAnswers {
                name: record.respondent_name.clone(),
                questions: BTreeMap::new(),
            });
        let question = respondent
            .questions
            .entry(record.question_id)
            .or_insert_with(|| AnsweredQuestion {
                question_id: record.question_id,
                title: record.question_title.clone(),
                position: record.position,
                answer: Answer::Choice {
                    content: Vec::new(),
                },
            });
        if let Answer::Choice { content } = &mut question.answer {
            content.push(AnsweredChoice {
                choice_id: record.choice_id,
                text: record.choice_text,
                selected: record.selected,
            });
        }
    }

    for record in open_answers {
        let respondent = respondents
            .entry(record.respondent_id)
            .or_insert_with(|| RespondentAnswers {
                name: record.respondent_name.clone(),
                questions: BTreeMap::new(),
            });
        respondent
            .questions
            .entry(record.question_id)
            .or_insert_with(|| AnsweredQuestion {
                question_id: record.question_id,
                title: record.question_title,
                position: record.position,
                answer: Answer::Open { text: record.text },
            });
    }

    respondents
        .into_iter()
        .map(|(respondent_id, answers)| {
            let mut questions: Vec<AnsweredQuestion> = answers.questions.into_values().collect();
            for question in &mut questions {
                if let Answer::Choice { content } = &mut question.answer {
                    content.sort_by_key(|c| c.choice_id);
                }
            }
            questions.sort_by_key(|q| (q.position, q.question_id));
            Submission {
                respondent_id,
                name: answers.name,
                questions,
            }
        })
        .collect()
}
