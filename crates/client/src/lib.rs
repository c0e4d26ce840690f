//! Marquee Session Client.
//!
//! A headless controller for the login/signup screen. It talks to the Auth
//! Service over HTTP (with a cookie jar), keeps the client session state in a
//! [`state::SessionStore`], and reports what the UI should show through
//! [`events::UiEvent`]s.
//!
//! - [`api`] -- typed calls to `/api/v1/user`.
//! - [`form`] -- the login/signup form state machine.
//! - [`state`] -- session state and its update actions.
//! - [`controller`] -- ties the above together and owns the expiry timer.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod form;
pub mod state;

pub use api::{ApiOutcome, AuthApi};
pub use config::ClientConfig;
pub use controller::{SessionController, SubmitOutcome};
pub use error::ClientError;
pub use events::{Notice, NoticeLevel, UiEvent, View};
pub use form::{AuthForm, AuthMode, FormError, FormPhase};
pub use state::{SessionAction, SessionState, SessionStore};
