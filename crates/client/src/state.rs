//! Client session state.
//!
//! [`SessionStore`] owns the current [`SessionState`] and is the only way to
//! change it: callers [`dispatch`](SessionStore::dispatch) a
//! [`SessionAction`], and subscribers observe every update through a
//! `tokio::sync::watch` receiver.

use marquee_core::wire::PublicUser;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// The logged-in user; `None` when logged out.
    pub user: Option<PublicUser>,
    /// A request to the Auth Service is in flight.
    pub is_loading: bool,
}

impl SessionState {
    /// Apply one action.
    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::SetUser(user) => self.user = user,
            SessionAction::SetLoading(loading) => self.is_loading = loading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    SetUser(Option<PublicUser>),
    SetLoading(bool),
}

#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<SessionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx }
    }

    pub fn dispatch(&self, action: SessionAction) {
        tracing::debug!(?action, "session action");
        self.tx.send_modify(|state| state.apply(action));
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn current_user(&self) -> Option<PublicUser> {
        self.tx.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().user.is_some()
    }
}
