//! Operator session shared by every console command.
//!
//! The session is an explicit context object held in the bot data. Changes
//! are published over a [`tokio::sync::watch`] channel so observers always
//! see the latest `{user, loading}` snapshot.

use tokio::sync::watch;
use tracing::info;

/// Snapshot of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Signed-in operator, if any
    pub user: Option<String>,
    /// True until startup has finished; protected views must wait
    pub loading: bool,
}

/// What a protected view should do for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Startup still in progress; render nothing protected
    Wait,
    /// Nobody signed in; route to login
    Login,
    /// Render for this operator
    Allow(String),
}

/// Decides access for a session snapshot.
#[must_use]
pub fn gate(state: &SessionState) -> Gate {
    if state.loading {
        return Gate::Wait;
    }
    state.user.clone().map_or(Gate::Login, Gate::Allow)
}

/// Publisher side of the session.
#[derive(Debug, Clone)]
pub struct Session {
    sender: std::sync::Arc<watch::Sender<SessionState>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts a session in the loading state with nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(SessionState {
            user: None,
            loading: true,
        });
        Self {
            sender: std::sync::Arc::new(sender),
        }
    }

    /// New observer; it sees the current state immediately.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.sender.borrow().clone()
    }

    /// Marks startup as done.
    pub fn finish_loading(&self) {
        self.sender.send_modify(|state| state.loading = false);
    }

    /// Signs an operator in.
    pub fn sign_in(&self, user: impl Into<String>) {
        let user = user.into();
        info!("Operator {user} signed in");
        self.sender.send_modify(|state| state.user = Some(user));
    }

    /// Signs the current operator out.
    pub fn sign_out(&self) {
        self.sender.send_modify(|state| {
            if let Some(user) = state.user.take() {
                info!("Operator {user} signed out");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_gate_decisions() {
        let mut state = SessionState {
            user: Some("ops".to_string()),
            loading: true,
        };
        assert_eq!(gate(&state), Gate::Wait);

        state.loading = false;
        assert_eq!(gate(&state), Gate::Allow("ops".to_string()));

        state.user = None;
        assert_eq!(gate(&state), Gate::Login);
    }

    #[test]
    fn test_new_session_is_loading() {
        let session = Session::new();
        assert_eq!(gate(&session.snapshot()), Gate::Wait);
        session.finish_loading();
        assert_eq!(gate(&session.snapshot()), Gate::Login);
    }

    #[tokio::test]
    async fn test_observers_see_changes() {
        let session = Session::new();
        let mut observer = session.subscribe();
        session.finish_loading();
        session.sign_in("ops");

        observer.changed().await.unwrap();
        assert_eq!(observer.borrow_and_update().user.as_deref(), Some("ops"));

        let clone = session.clone();
        clone.sign_out();
        observer.changed().await.unwrap();
        assert_eq!(gate(&observer.borrow()), Gate::Login);
    }
}
