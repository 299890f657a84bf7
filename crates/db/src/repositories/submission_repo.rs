//! Repository for the `submissions`, `close_answers` and `open_answers` tables.

use sqlx::{PgPool, Postgres, Transaction};
use survey_core::submission::SubmissionDraft;
use survey_core::types::DbId;

use crate::models::answer::{CloseAnswerRow, OpenAnswerRow, RespondentRow, SurveyAnswers};

/// Provides submission persistence and answer loading.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Allocate a fresh respondent id by inserting the submission header.
    ///
    /// The id comes from the `submissions` sequence, so two concurrent
    /// respondents can never be handed the same one. If the surrounding
    /// transaction rolls back, the id is simply skipped.
    pub async fn allocate_respondent_id(
        tx: &mut Transaction<'_, Postgres>,
        survey_id: DbId,
        respondent_name: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO submissions (survey_id, respondent_name)
             VALUES ($1, $2)
             RETURNING id",
        )
        .bind(survey_id)
        .bind(respondent_name)
        .fetch_one(&mut **tx)
        .await
    }

    /// Persist a validated submission and bump the survey's counter.
    ///
    /// Header, answers and counter are written in one transaction. Returns
    /// the respondent id. Fails with [`sqlx::Error::RowNotFound`] if the
    /// survey no longer exists.
    pub async fn persist(
        pool: &PgPool,
        survey_id: DbId,
        draft: &SubmissionDraft,
    ) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let respondent_id = Self::allocate_respondent_id(&mut tx, survey_id, &draft.name).await?;

        if !draft.close_answers.is_empty() {
            let choice_ids: Vec<DbId> = draft.close_answers.iter().map(|a| a.choice_id).collect();
            let selected: Vec<bool> = draft.close_answers.iter().map(|a| a.is_selected()).collect();

            sqlx::query(
                "INSERT INTO close_answers (submission_id, choice_id, selected)
                 SELECT $1::bigint, * FROM UNNEST($2::bigint[], $3::bool[])",
            )
            .bind(respondent_id)
            .bind(&choice_ids)
            .bind(&selected)
            .execute(&mut *tx)
            .await?;
        }

        if !draft.open_answers.is_empty() {
            let question_ids: Vec<DbId> = draft.open_answers.iter().map(|a| a.question_id).collect();
            let texts: Vec<String> = draft.open_answers.iter().map(|a| a.text.clone()).collect();

            sqlx::query(
                "INSERT INTO open_answers (submission_id, question_id, text)
                 SELECT $1::bigint, * FROM UNNEST($2::bigint[], $3::text[])",
            )
            .bind(respondent_id)
            .bind(&question_ids)
            .bind(&texts)
            .execute(&mut *tx)
            .await?;
        }

        let updated =
            sqlx::query("UPDATE surveys SET submission_count = submission_count + 1 WHERE id = $1")
                .bind(survey_id)
                .execute(&mut *tx)
                .await?;
        if updated.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        tx.commit().await?;
        tracing::debug!(survey_id, respondent_id, "Submission stored");
        Ok(respondent_id)
    }

    /// Load every submission header and stored answer to a survey, answers
    /// joined with question and choice text, ordered by respondent, question
    /// position and choice id.
    pub async fn load_rows(pool: &PgPool, survey_id: DbId) -> Result<SurveyAnswers, sqlx::Error> {
        let respondents = sqlx::query_as::<_, RespondentRow>(
            "SELECT id AS respondent_id, respondent_name
             FROM submissions
             WHERE survey_id = $1
             ORDER BY id",
        )
        .bind(survey_id)
        .fetch_all(pool)
        .await?;

        let close_answers = sqlx::query_as::<_, CloseAnswerRow>(
            "SELECT s.id AS respondent_id, s.respondent_name,
                    q.id AS question_id, q.title AS question_title, q.position,
                    c.id AS choice_id, c.text AS choice_text, ca.selected
             FROM close_answers ca
             JOIN submissions s ON s.id = ca.submission_id
             JOIN choices c ON c.id = ca.choice_id
             JOIN questions q ON q.id = c.question_id
             WHERE s.survey_id = $1
             ORDER BY s.id, q.position, c.id",
        )
        .bind(survey_id)
        .fetch_all(pool)
        .await?;

        let open_answers = sqlx::query_as::<_, OpenAnswerRow>(
            "SELECT s.id AS respondent_id, s.respondent_name,
                    q.id AS question_id, q.title AS question_title, q.position,
                    oa.text
             FROM open_answers oa
             JOIN submissions s ON s.id = oa.submission_id
             JOIN questions q ON q.id = oa.question_id
             WHERE s.survey_id = $1
             ORDER BY s.id, q.position",
        )
        .bind(survey_id)
        .fetch_all(pool)
        .await?;

        Ok(SurveyAnswers {
            respondents: respondents.into_iter().map(Into::into).collect(),
            close_answers: close_answers.into_iter().map(Into::into).collect(),
            open_answers: open_answers.into_iter().map(Into::into).collect(),
        })
    }
}
