//! # Session Context
//!
//! Who is counting, where, and how to tell them things. Passed
//! explicitly to the session and submission driver so nothing in this
//! crate reads ambient globals.

use std::fmt;
use std::sync::Arc;

/// User-facing notifications (toasts on the count screen).
///
/// The engine reports outcomes through this trait; how they render is
/// the embedding UI's concern. Tests plug in a recording impl.
pub trait Notify: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// A notifier that drops every message, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotify;

impl Notify for SilentNotify {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// The identity and notification sink a count session runs under.
#[derive(Clone)]
pub struct SessionContext {
    /// Restaurant the count belongs to.
    pub restaurant_id: String,
    /// Acting user, recorded as `counted_by`.
    pub user_id: String,
    notifier: Arc<dyn Notify>,
}

impl SessionContext {
    pub fn new(restaurant_id: &str, user_id: &str, notifier: Arc<dyn Notify>) -> Self {
        SessionContext {
            restaurant_id: restaurant_id.to_string(),
            user_id: user_id.to_string(),
            notifier,
        }
    }

    /// A context that swallows notifications, for headless callers and
    /// tests that don't assert on toasts.
    pub fn silent(restaurant_id: &str, user_id: &str) -> Self {
        Self::new(restaurant_id, user_id, Arc::new(SilentNotify))
    }

    pub fn notifier(&self) -> &dyn Notify {
        self.notifier.as_ref()
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("restaurant_id", &self.restaurant_id)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
