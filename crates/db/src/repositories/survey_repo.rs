//! Repository for the `surveys`, `questions` and `choices` tables.

use std::collections::HashMap;

use sqlx::PgPool;
use survey_core::assembly::FlatSurvey;
use survey_core::types::DbId;

use crate::models::survey::{ChoiceRow, PublicSurvey, QuestionRow, SurveyRecords, SurveyRow};

const SURVEY_COLUMNS: &str =
    "id, title, description, admin_id, submission_count, created_at, updated_at";

const QUESTION_COLUMNS: &str = "id, survey_id, title, min, max, position";

/// Provides survey creation and lookups.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert a flattened survey with its questions and choices.
    ///
    /// All rows are written in one transaction; a failure on any of them
    /// leaves nothing behind. Returns the new survey id.
    pub async fn create(pool: &PgPool, flat: &FlatSurvey) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let survey_id: DbId = sqlx::query_scalar(
            "INSERT INTO surveys (title, description, admin_id)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&flat.survey.title)
        .bind(&flat.survey.description)
        .bind(flat.survey.admin_id)
        .fetch_one(&mut *tx)
        .await?;

        if !flat.questions.is_empty() {
            let titles: Vec<String> = flat.questions.iter().map(|q| q.title.clone()).collect();
            let mins: Vec<i32> = flat.questions.iter().map(|q| q.min).collect();
            let maxes: Vec<i32> = flat.questions.iter().map(|q| q.max).collect();
            let positions: Vec<i32> = flat.questions.iter().map(|q| q.position).collect();

            let inserted: Vec<(DbId, i32)> = sqlx::query_as(
                "INSERT INTO questions (survey_id, title, min, max, position)
                 SELECT $1::bigint, * FROM UNNEST($2::text[], $3::int[], $4::int[], $5::int[])
                 RETURNING id, position",
            )
            .bind(survey_id)
            .bind(&titles)
            .bind(&mins)
            .bind(&maxes)
            .bind(&positions)
            .fetch_all(&mut *tx)
            .await?;

            let question_ids: HashMap<i32, DbId> =
                inserted.into_iter().map(|(id, position)| (position, id)).collect();

            if !flat.choices.is_empty() {
                let owners = flat
                    .choices
                    .iter()
                    .map(|c| {
                        question_ids.get(&c.question_position).copied().ok_or_else(|| {
                            sqlx::Error::Protocol(format!(
                                "choice refers to missing question position {}",
                                c.question_position
                            ))
                        })
                    })
                    .collect::<Result<Vec<DbId>, _>>()?;
                let texts: Vec<String> = flat.choices.iter().map(|c| c.text.clone()).collect();

                sqlx::query(
                    "INSERT INTO choices (question_id, text)
                     SELECT * FROM UNNEST($1::bigint[], $2::text[])",
                )
                .bind(&owners)
                .bind(&texts)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(survey_id)
    }

    /// Find a survey row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SurveyRow>, sqlx::Error> {
        let query = format!("SELECT {SURVEY_COLUMNS} FROM surveys WHERE id = $1");
        sqlx::query_as::<_, SurveyRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every survey for respondents, oldest first.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<PublicSurvey>, sqlx::Error> {
        sqlx::query_as::<_, PublicSurvey>(
            "SELECT id, title, description, admin_id FROM surveys ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// List the surveys owned by an administrator, with submission counts.
    pub async fn list_by_admin(
        pool: &PgPool,
        admin_id: DbId,
    ) -> Result<Vec<SurveyRow>, sqlx::Error> {
        let query = format!(
            "SELECT {SURVEY_COLUMNS} FROM surveys
             WHERE admin_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, SurveyRow>(&query)
            .bind(admin_id)
            .fetch_all(pool)
            .await
    }

    /// Load the survey, question and choice rows needed to assemble a survey.
    ///
    /// Returns `None` if the survey does not exist.
    pub async fn load_records(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Option<SurveyRecords>, sqlx::Error> {
        let Some(survey) = Self::find_by_id(pool, survey_id).await? else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions
             WHERE survey_id = $1
             ORDER BY position, id"
        );
        let questions = sqlx::query_as::<_, QuestionRow>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await?;

        let choices = sqlx::query_as::<_, ChoiceRow>(
            "SELECT c.id, c.question_id, c.text
             FROM choices c
             JOIN questions q ON q.id = c.question_id
             WHERE q.survey_id = $1
             ORDER BY c.id",
        )
        .bind(survey_id)
        .fetch_all(pool)
        .await?;

        Ok(Some(SurveyRecords {
            survey: survey.into(),
            questions: questions.into_iter().map(Into::into).collect(),
            choices: choices.into_iter().map(Into::into).collect(),
        }))
    }
}
