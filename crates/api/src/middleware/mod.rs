//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- the user id carried by a valid session cookie.

pub mod auth;
