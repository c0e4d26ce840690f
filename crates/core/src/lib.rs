//! Domain primitives shared by the Marquee Auth Service and Session Client.
//!
//! - [`error`] -- the domain error taxonomy.
//! - [`types`] -- id and timestamp aliases.
//! - [`validation`] -- registration and login input rules.
//! - [`wire`] -- JSON bodies exchanged over `/api/v1/user`.

pub mod error;
pub mod types;
pub mod validation;
pub mod wire;
