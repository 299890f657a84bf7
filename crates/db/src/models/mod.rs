//! Row structs and DTOs.
//!
//! Row structs derive `FromRow`; those that feed the pure survey logic
//! convert into the matching `survey_core` record type.

pub mod admin;
pub mod answer;
pub mod session;
pub mod survey;
