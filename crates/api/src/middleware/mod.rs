//! Request extractors.
//!
//! - [`auth::AuthAdmin`] -- the administrator behind a live session token.

pub mod auth;
