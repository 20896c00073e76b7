//! # Shared Session State
//!
//! Wraps the current [`CountSession`] for embedding in a UI shell where
//! handlers run concurrently. One session is live at a time; starting a
//! new one replaces it.

use std::sync::{Arc, Mutex};

use crate::session::CountSession;

/// Shared handle to the live count session, if any.
///
/// ## Thread Safety
/// `Arc<Mutex<_>>` because UI command handlers may run concurrently and
/// every session operation is a quick in-memory mutation. Lock scope is
/// confined to the closure passed in.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<Option<CountSession>>>,
}

impl SessionState {
    /// Creates state with no live session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the live session, returning the previous one.
    pub fn start(&self, session: CountSession) -> Option<CountSession> {
        let mut guard = self.session.lock().expect("session mutex poisoned");
        guard.replace(session)
    }

    /// Drops the live session.
    pub fn finish(&self) -> Option<CountSession> {
        let mut guard = self.session.lock().expect("session mutex poisoned");
        guard.take()
    }

    /// Runs `f` with read access to the live session. Returns `None`
    /// when no session is live.
    pub fn with_session<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&CountSession) -> R,
    {
        let guard = self.session.lock().expect("session mutex poisoned");
        guard.as_ref().map(f)
    }

    /// Runs `f` with write access to the live session. Returns `None`
    /// when no session is live.
    pub fn with_session_mut<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut CountSession) -> R,
    {
        let mut guard = self.session.lock().expect("session mutex poisoned");
        guard.as_mut().map(f)
    }
}
