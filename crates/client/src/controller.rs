//! Drives the login/signup screen against the Auth Service.
//!
//! The controller owns the form, the session store, and a single session
//! expiry timer. The timer is armed from the `expiresIn` the server returns
//! on login, so the client session ends when the cookie does. Arming a new
//! timer cancels the previous one, and logout cancels it outright.
//!
//! Form and timer state sit behind plain mutexes that are never held across
//! an `.await`, so a [`SessionController::submit`] future that is dropped
//! mid-request can still put the form back to `Idle`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use marquee_core::wire::{LoginRequest, PublicUser, RegisterRequest};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiOutcome, AuthApi};
use crate::error::ClientError;
use crate::events::{UiEvent, View};
use crate::form::{AuthForm, AuthMode, FormError, Submission};
use crate::state::{SessionAction, SessionStore};

const REGISTER_FALLBACK: &str = "Registration failed. Please try again.";
const LOGIN_FALLBACK: &str = "Login failed. Please try again.";

/// What a [`SessionController::submit`] call ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Signup succeeded; the form is now in login mode.
    Registered,
    /// Login succeeded; the user is in the session store.
    LoggedIn(PublicUser),
    /// The server rejected the request or it never completed.
    Failed,
}

impl SubmitOutcome {
    pub fn succeeded(&self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// The armed expiry timer. `generation` identifies it, so a timer that fires
/// after being replaced can tell it is stale.
struct ExpiryTimer {
    generation: u64,
    token: CancellationToken,
}

#[derive(Default)]
struct ExpirySlot {
    next_generation: u64,
    current: Option<ExpiryTimer>,
}

struct Inner {
    api: AuthApi,
    store: SessionStore,
    form: Mutex<AuthForm>,
    expiry: Mutex<ExpirySlot>,
    events: mpsc::UnboundedSender<UiEvent>,
}

/// Cheaply cloneable handle; clones share state.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

/// Undoes `begin_submit` and the loading flag if a submission is dropped
/// before its response is applied.
struct PendingSubmit<'a> {
    controller: &'a SessionController,
    done: bool,
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        tracing::debug!("Submission dropped before completion");
        self.controller.form_lock().abandon_submit();
        self.controller.dispatch(SessionAction::SetLoading(false));
    }
}

impl SessionController {
    pub fn new(api: AuthApi, events: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                store: SessionStore::new(),
                form: Mutex::new(AuthForm::new()),
                expiry: Mutex::new(ExpirySlot::default()),
                events,
            }),
        }
    }

    /// Build a controller together with the receiver for its UI events.
    pub fn with_channel(api: AuthApi) -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(api, tx), rx)
    }

    pub fn store(&self) -> &SessionStore {
        &self.inner.store
    }

    /// A copy of the form as it stands.
    pub fn form(&self) -> AuthForm {
        self.form_lock().clone()
    }

    pub fn set_full_name(&self, value: impl Into<String>) {
        self.form_lock().full_name = value.into();
    }

    pub fn set_email(&self, value: impl Into<String>) {
        self.form_lock().email = value.into();
    }

    pub fn set_password(&self, value: impl Into<String>) {
        self.form_lock().password = value.into();
    }

    pub fn toggle_mode(&self) -> Result<AuthMode, FormError> {
        self.form_lock().toggle_mode()
    }

    /// Submit the form in its current mode.
    ///
    /// Only fails if a submission is already outstanding. Server rejections
    /// and transport errors become a notification and
    /// [`SubmitOutcome::Failed`]. The loading flag is cleared and the form
    /// fields are emptied in every case, including when this future is
    /// dropped before the response arrives.
    pub async fn submit(&self) -> Result<SubmitOutcome, FormError> {
        let submission = self.form_lock().begin_submit()?;
        let mode = submission.mode();

        let mut pending = PendingSubmit {
            controller: self,
            done: false,
        };
        self.dispatch(SessionAction::SetLoading(true));
        let outcome = match submission {
            Submission::Register(input) => self.register(&input).await,
            Submission::Login(input) => self.login(&input).await,
        };
        pending.done = true;
        self.dispatch(SessionAction::SetLoading(false));

        self.form_lock().finish_submit(mode, outcome.succeeded())?;

        if matches!(outcome, SubmitOutcome::LoggedIn(_)) {
            self.emit(UiEvent::Navigate(View::Browse));
        }
        Ok(outcome)
    }

    /// Log out: cancel the expiry timer, tell the server, clear the session
    /// and go to the landing view.
    ///
    /// Server and transport failures are logged, never surfaced; the local
    /// session is cleared regardless.
    pub async fn logout(&self) {
        self.cancel_expiry();
        self.end_session().await;
    }

    /// Ask the server who we are.
    ///
    /// A 401 means the cookie is gone or expired: the local session is
    /// cleared and `Ok(None)` returned.
    pub async fn refresh_session(&self) -> Result<Option<PublicUser>, ClientError> {
        let outcome = self.inner.api.me().await?;
        match outcome {
            ApiOutcome::Success(body) => {
                self.dispatch(SessionAction::SetUser(Some(body.user.clone())));
                Ok(Some(body.user))
            }
            rejected if rejected.is_unauthorized() => {
                self.cancel_expiry();
                self.dispatch(SessionAction::SetUser(None));
                Ok(None)
            }
            ApiOutcome::Rejected { status, message } => {
                tracing::warn!(%status, ?message, "Profile request rejected");
                Ok(self.inner.store.current_user())
            }
        }
    }

    /// Whether a session expiry timer is currently armed.
    pub fn expiry_armed(&self) -> bool {
        self.expiry_lock()
            .current
            .as_ref()
            .is_some_and(|timer| !timer.token.is_cancelled())
    }

    async fn register(&self, input: &RegisterRequest) -> SubmitOutcome {
        match self.inner.api.register(input).await {
            Ok(ApiOutcome::Success(body)) => {
                self.emit(UiEvent::success(body.message));
                SubmitOutcome::Registered
            }
            Ok(ApiOutcome::Rejected { message, .. }) => {
                self.emit(UiEvent::error(message.unwrap_or_else(|| REGISTER_FALLBACK.into())));
                SubmitOutcome::Failed
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration request failed");
                self.emit(UiEvent::error(REGISTER_FALLBACK));
                SubmitOutcome::Failed
            }
        }
    }

    async fn login(&self, input: &LoginRequest) -> SubmitOutcome {
        match self.inner.api.login(input).await {
            Ok(ApiOutcome::Success(body)) => {
                self.dispatch(SessionAction::SetUser(Some(body.user.clone())));
                self.arm_expiry(body.expires_in);
                self.emit(UiEvent::success(body.message));
                SubmitOutcome::LoggedIn(body.user)
            }
            Ok(ApiOutcome::Rejected { message, .. }) => {
                self.emit(UiEvent::error(message.unwrap_or_else(|| LOGIN_FALLBACK.into())));
                SubmitOutcome::Failed
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login request failed");
                self.emit(UiEvent::error(LOGIN_FALLBACK));
                SubmitOutcome::Failed
            }
        }
    }

    /// Tell the server, clear the session and go to the landing view.
    async fn end_session(&self) {
        match self.inner.api.logout().await {
            Ok(ApiOutcome::Success(body)) => self.emit(UiEvent::success(body.message)),
            Ok(ApiOutcome::Rejected { status, message }) => {
                tracing::warn!(%status, ?message, "Logout rejected by server");
            }
            Err(e) => tracing::warn!(error = %e, "Logout request failed"),
        }

        self.dispatch(SessionAction::SetUser(None));
        self.emit(UiEvent::Navigate(View::Landing));
    }

    /// Replace any armed timer with one that logs out after `expires_in`
    /// seconds. Returns the new timer's generation.
    fn arm_expiry(&self, expires_in: i64) -> u64 {
        let token = CancellationToken::new();
        let generation = {
            let mut slot = self.expiry_lock();
            let generation = slot.next_generation;
            slot.next_generation += 1;
            let previous = slot.current.replace(ExpiryTimer {
                generation,
                token: token.clone(),
            });
            if let Some(previous) = previous {
                previous.token.cancel();
            }
            generation
        };

        let delay = Duration::from_secs(u64::try_from(expires_in).unwrap_or(0));
        let controller = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    if controller.claim_expiry(generation) {
                        tracing::info!("Session expired, logging out");
                        controller.end_session().await;
                    }
                }
            }
        });
        generation
    }

    /// Disarm the timer if it is still the one with `generation`.
    ///
    /// Returns `false` for a timer that was cancelled or replaced, which
    /// must not end the session that replaced it.
    fn claim_expiry(&self, generation: u64) -> bool {
        let mut slot = self.expiry_lock();
        let is_current = slot
            .current
            .as_ref()
            .is_some_and(|timer| timer.generation == generation && !timer.token.is_cancelled());
        if is_current {
            slot.current = None;
        }
        is_current
    }

    fn cancel_expiry(&self) {
        if let Some(timer) = self.expiry_lock().current.take() {
            timer.token.cancel();
        }
    }

    fn form_lock(&self) -> MutexGuard<'_, AuthForm> {
        self.inner
            .form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn expiry_lock(&self) -> MutexGuard<'_, ExpirySlot> {
        self.inner
            .expiry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, action: SessionAction) {
        self.inner.store.dispatch(action);
    }

    fn emit(&self, event: UiEvent) {
        // The UI may have gone away; nothing to do then.
        let _ = self.inner.events.send(event);
    }
}
