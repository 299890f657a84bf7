//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod admin_repo;
pub mod session_repo;
pub mod submission_repo;
pub mod survey_repo;

pub use admin_repo::AdminRepo;
pub use session_repo::SessionRepo;
pub use submission_repo::SubmissionRepo;
pub use survey_repo::SurveyRepo;
