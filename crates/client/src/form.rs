//! The login/signup form as a state machine.
//!
//! States are `{Signup, Login} × {Idle, Submitting}`. Submission always goes
//! `Idle → Submitting → Idle`. The mode cannot change while a submission is
//! outstanding, and the response is applied under the mode captured by
//! [`AuthForm::begin_submit`].

use marquee_core::wire::{LoginRequest, RegisterRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    Login,
    #[default]
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("A submission is already in progress")]
    SubmissionInProgress,
    #[error("No submission is in progress")]
    NotSubmitting,
}

/// A request built from the form, tagged with the mode it was built in.
#[derive(Debug, Clone)]
pub enum Submission {
    Register(RegisterRequest),
    Login(LoginRequest),
}

impl Submission {
    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Register(_) => AuthMode::Signup,
            Self::Login(_) => AuthMode::Login,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    mode: AuthMode,
    phase: FormPhase,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Flip between login and signup. Refused while submitting.
    pub fn toggle_mode(&mut self) -> Result<AuthMode, FormError> {
        if self.phase == FormPhase::Submitting {
            return Err(FormError::SubmissionInProgress);
        }
        self.mode = self.mode.toggled();
        Ok(self.mode)
    }

    /// Enter `Submitting` and build the request for the current mode.
    ///
    /// Login ignores the full-name field.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        if self.phase == FormPhase::Submitting {
            return Err(FormError::SubmissionInProgress);
        }
        self.phase = FormPhase::Submitting;

        Ok(match self.mode {
            AuthMode::Signup => Submission::Register(RegisterRequest {
                full_name: self.full_name.clone(),
                email: self.email.clone(),
                password: self.password.clone(),
            }),
            AuthMode::Login => Submission::Login(LoginRequest {
                email: self.email.clone(),
                password: self.password.clone(),
            }),
        })
    }

    /// Return to `Idle` and clear every field, whatever the outcome.
    ///
    /// A successful signup moves the form to login mode.
    pub fn finish_submit(&mut self, submitted: AuthMode, succeeded: bool) -> Result<(), FormError> {
        if self.phase != FormPhase::Submitting {
            return Err(FormError::NotSubmitting);
        }
        self.phase = FormPhase::Idle;
        self.full_name.clear();
        self.email.clear();
        self.password.clear();

        if submitted == AuthMode::Signup && succeeded {
            self.mode = AuthMode::Login;
        }
        Ok(())
    }

    /// Drop an outstanding submission whose response will never arrive.
    ///
    /// Returns to `Idle` and clears the fields; the mode is left as it was.
    /// A no-op when idle.
    pub fn abandon_submit(&mut self) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Idle;
            self.full_name.clear();
            self.email.clear();
            self.password.clear();
        }
    }
}
