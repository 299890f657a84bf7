//! The survey aggregate.
//!
//! Storage encodes the question type in the `max` column (`0` = open text,
//! `>= 1` = choice). In the domain that overloading is replaced by
//! [`QuestionKind`]; [`QuestionKind::from_bounds`] and [`QuestionKind::bounds`]
//! convert at the storage boundary.

use serde::Serialize;

use crate::types::DbId;

/// Upper bound on choices per question, and therefore on `max`.
pub const MAX_CHOICES_PER_QUESTION: usize = 10;

/// Upper bound on the length of an open answer, in characters.
pub const MAX_OPEN_ANSWER_CHARS: usize = 200;

/// Upper bound on the respondent's display name, in characters.
pub const MAX_RESPONDENT_NAME_CHARS: usize = 100;

/// One selectable choice of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: DbId,
    pub text: String,
}

/// What a question asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free text, optionally required.
    Open { required: bool },
    /// Pick between `min` and `max` of `choices`.
    Choice {
        min: u32,
        max: u32,
        choices: Vec<Choice>,
    },
}

impl QuestionKind {
    /// Decode the stored `(min, max)` pair.
    ///
    /// Returns `None` when the pair does not describe a well-formed question:
    /// negative bounds, an open question with `min > 1`, or a choice question
    /// whose bounds do not fit `0 <= min <= max <= choices.len() <= 10`.
    /// Choices attached to an open question are dropped.
    pub fn from_bounds(min: i32, max: i32, choices: Vec<Choice>) -> Option<Self> {
        let min = u32::try_from(min).ok()?;
        let max = u32::try_from(max).ok()?;

        if max == 0 {
            return match min {
                0 => Some(Self::Open { required: false }),
                1 => Some(Self::Open { required: true }),
                _ => None,
            };
        }

        let count = choices.len();
        if count > MAX_CHOICES_PER_QUESTION || min > max || max as usize > count {
            return None;
        }

        Some(Self::Choice { min, max, choices })
    }

    /// Encode back into the stored `(min, max)` pair.
    pub fn bounds(&self) -> (i32, i32) {
        match self {
            Self::Open { required } => (i32::from(*required), 0),
            // Both bounds are <= MAX_CHOICES_PER_QUESTION.
            Self::Choice { min, max, .. } => (*min as i32, *max as i32),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// The choices of a choice question; empty for open questions.
    pub fn choices(&self) -> &[Choice] {
        match self {
            Self::Open { .. } => &[],
            Self::Choice { choices, .. } => choices,
        }
    }
}

/// A question as presented to respondents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: DbId,
    pub title: String,
    /// Zero-based, contiguous within the survey.
    pub position: i32,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// Look up one of this question's choices.
    pub fn choice(&self, choice_id: DbId) -> Option<&Choice> {
        self.kind.choices().iter().find(|c| c.id == choice_id)
    }
}

/// A published survey with its ordered questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Survey {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub admin_id: DbId,
    pub submission_count: i64,
    pub questions: Vec<Question>,
}
