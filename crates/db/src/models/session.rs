//! Administrator session model and DTOs.

use sqlx::FromRow;
use survey_core::types::{DbId, Timestamp};

/// A row from the `admin_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub admin_id: DbId,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a session.
pub struct CreateSession {
    pub admin_id: DbId,
    pub expires_at: Timestamp,
}
