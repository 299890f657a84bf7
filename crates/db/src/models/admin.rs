//! Administrator model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use survey_core::types::{DbId, Timestamp};

/// Full row from the `admins` table.
///
/// Contains the password hash -- never serialize this to API responses.
/// Use [`AdminInfo`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public administrator identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminInfo {
    pub id: DbId,
    pub email: String,
    pub name: String,
}

impl From<&Admin> for AdminInfo {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
            name: admin.name.clone(),
        }
    }
}

/// DTO for creating an administrator.
#[derive(Debug)]
pub struct CreateAdmin {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}
