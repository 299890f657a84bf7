//! Authoring and submission validation -- pure decisions, nothing is mutated.
//!
//! Both entry points stop at the first violation and report it as a
//! structured [`ValidationError`], so callers can tell which field or
//! question was at fault.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::assembly::SurveyDraft;
use crate::submission::SubmissionDraft;
use crate::survey::{
    Question, QuestionKind, MAX_CHOICES_PER_QUESTION, MAX_OPEN_ANSWER_CHARS,
    MAX_RESPONDENT_NAME_CHARS,
};
use crate::types::DbId;

/// The input a validation failure refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Field {
    /// The respondent's display name.
    Name,
    /// The survey title.
    Title,
    /// The title of the authored question at `index`.
    QuestionTitle { index: usize },
    /// The answer to a stored question.
    Question { question_id: DbId },
    /// Choice text `choice` of the authored question at `index`.
    Choice { index: usize, choice: usize },
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Title => f.write_str("title"),
            Self::QuestionTitle { index } => write!(f, "title of question #{index}"),
            Self::Question { question_id } => write!(f, "answer to question {question_id}"),
            Self::Choice { index, choice } => {
                write!(f, "choice #{choice} of question #{index}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Question {question_id} needs between {min} and {max} selected choices, got {actual}")]
    Cardinality {
        question_id: DbId,
        min: u32,
        max: u32,
        actual: usize,
    },

    #[error("The {field} is required")]
    RequiredField { field: Field },

    #[error("The {field} must be at most {max} characters, got {actual}")]
    Length {
        field: Field,
        max: usize,
        actual: usize,
    },

    #[error("Question {question_id} is not an open question of this survey")]
    UnknownQuestion { question_id: DbId },

    #[error("Choice {choice_id} is not a choice of question {question_id} in this survey")]
    UnknownChoice { question_id: DbId, choice_id: DbId },

    #[error("Question {question_id} is answered more than once")]
    DuplicateAnswer { question_id: DbId },

    #[error("Choice {choice_id} of question {question_id} has value {value}, expected 0 or 1")]
    InvalidSelection {
        question_id: DbId,
        choice_id: DbId,
        value: i64,
    },

    #[error("Question #{index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },

    #[error("Submission names survey {actual} but was posted to survey {expected}")]
    SurveyMismatch { expected: DbId, actual: DbId },
}

// ---------------------------------------------------------------------------
// Authoring
// ---------------------------------------------------------------------------

/// Check an authored survey before it is flattened and stored.
///
/// The title must be non-empty. Every question needs a non-empty title and
/// bounds in storage encoding: an open question (`max == 0`) has `min` 0 or 1;
/// a choice question has `0 <= min <= max <= choices <= 10` and non-empty
/// choice texts.
pub fn validate_survey_draft(draft: &SurveyDraft) -> Result<(), ValidationError> {
    if draft.title.is_empty() {
        return Err(ValidationError::RequiredField {
            field: Field::Title,
        });
    }

    for (index, question) in draft.questions.iter().enumerate() {
        let invalid = |reason: &str| ValidationError::InvalidQuestion {
            index,
            reason: reason.to_string(),
        };

        if question.title.is_empty() {
            return Err(ValidationError::RequiredField {
                field: Field::QuestionTitle { index },
            });
        }
        if question.min < 0 || question.max < 0 {
            return Err(invalid("min and max must not be negative"));
        }
        if question.max as usize > MAX_CHOICES_PER_QUESTION {
            return Err(invalid("max must be at most 10"));
        }

        if question.max == 0 {
            if question.min > 1 {
                return Err(invalid("an open question has min 0 (optional) or 1 (required)"));
            }
            continue;
        }

        let count = question.choices.len();
        if count == 0 {
            return Err(invalid("a choice question needs at least one choice"));
        }
        if count > MAX_CHOICES_PER_QUESTION {
            return Err(invalid("a choice question has at most 10 choices"));
        }
        if question.min > question.max {
            return Err(invalid("min must not exceed max"));
        }
        if question.max as usize > count {
            return Err(invalid("max must not exceed the number of choices"));
        }
        if let Some(choice) = question.choices.iter().position(|c| c.is_empty()) {
            return Err(ValidationError::RequiredField {
                field: Field::Choice { index, choice },
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// Decide whether `submission` is a well-formed answer to `questions`.
///
/// Checks, in order: the respondent name (1..=100 characters); every close
/// answer references a choice of a choice question, at most once, with value
/// 0 or 1; every open answer references an open question, at most once, with
/// at most 200 characters; then, per question in position order, that the
/// number of selected choices is within `[min, max]` and that required open
/// questions have non-empty text.
pub fn validate_submission(
    questions: &[Question],
    submission: &SubmissionDraft,
) -> Result<(), ValidationError> {
    let name_len = submission.name.chars().count();
    if name_len == 0 || name_len > MAX_RESPONDENT_NAME_CHARS {
        return Err(ValidationError::RequiredField { field: Field::Name });
    }

    let by_id: HashMap<DbId, &Question> = questions.iter().map(|q| (q.id, q)).collect();

    let mut seen_choices = HashSet::new();
    let mut selected: HashMap<DbId, usize> = HashMap::new();
    for answer in &submission.close_answers {
        let known = by_id
            .get(&answer.question_id)
            .and_then(|q| q.choice(answer.choice_id))
            .is_some();
        if !known {
            return Err(ValidationError::UnknownChoice {
                question_id: answer.question_id,
                choice_id: answer.choice_id,
            });
        }
        if !seen_choices.insert(answer.choice_id) {
            return Err(ValidationError::DuplicateAnswer {
                question_id: answer.question_id,
            });
        }
        if !matches!(answer.value, 0 | 1) {
            return Err(ValidationError::InvalidSelection {
                question_id: answer.question_id,
                choice_id: answer.choice_id,
                value: answer.value,
            });
        }
        if answer.is_selected() {
            *selected.entry(answer.question_id).or_default() += 1;
        }
    }

    let mut open_texts: HashMap<DbId, &str> = HashMap::new();
    for answer in &submission.open_answers {
        let is_open = by_id
            .get(&answer.question_id)
            .is_some_and(|q| q.kind.is_open());
        if !is_open {
            return Err(ValidationError::UnknownQuestion {
                question_id: answer.question_id,
            });
        }
        if open_texts
            .insert(answer.question_id, answer.text.as_str())
            .is_some()
        {
            return Err(ValidationError::DuplicateAnswer {
                question_id: answer.question_id,
            });
        }
        let len = answer.text.chars().count();
        if len > MAX_OPEN_ANSWER_CHARS {
            return Err(ValidationError::Length {
                field: Field::Question {
                    question_id: answer.question_id,
                },
                max: MAX_OPEN_ANSWER_CHARS,
                actual: len,
            });
        }
    }

    let mut ordered: Vec<&Question> = questions.iter().collect();
    ordered.sort_by_key(|q| (q.position, q.id));
    for question in ordered {
        match &question.kind {
            QuestionKind::Choice { min, max, .. } => {
                let actual = selected.get(&question.id).copied().unwrap_or(0);
                if actual < *min as usize || actual > *max as usize {
                    return Err(ValidationError::Cardinality {
                        question_id: question.id,
                        min: *min,
                        max: *max,
                        actual,
                    });
                }
            }
            QuestionKind::Open { required: true } => {
                let answered = open_texts
                    .get(&question.id)
                    .is_some_and(|text| !text.is_empty());
                if !answered {
                    return Err(ValidationError::RequiredField {
                        field: Field::Question {
                            question_id: question.id,
                        },
                    });
                }
            }
            QuestionKind::Open { required: false } => {}
        }
    }

    Ok(())
}
