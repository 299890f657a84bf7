//! Repository for the `admins` table.

use sqlx::PgPool;
use survey_core::types::DbId;

use crate::models::admin::{Admin, CreateAdmin};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, password_hash, created_at, updated_at";

/// Provides lookups and inserts for administrators.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new administrator, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAdmin) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (email, name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Insert an administrator unless one with the same email exists.
    ///
    /// Returns `None` when the email was already taken.
    pub async fn create_if_absent(
        pool: &PgPool,
        input: &CreateAdmin,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (email, name, password_hash)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_admins_email DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Find an administrator by login email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE email = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find an administrator by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
