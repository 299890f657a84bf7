//! Survey domain logic.
//!
//! Pure transformations and decisions with no I/O:
//!
//! - [`survey`] -- the survey aggregate and the open/choice question sum type.
//! - [`assembly`] -- building surveys from flat rows and flattening authored drafts.
//! - [`validation`] -- authoring and submission validation.
//! - [`submission`] -- respondent answers and regrouping of stored answer rows.

pub mod assembly;
pub mod error;
pub mod submission;
pub mod survey;
pub mod types;
pub mod validation;
