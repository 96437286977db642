//! Typed access to the session for its consumers.

use std::sync::Arc;

use tokio::sync::watch;

use crate::session::manager::{SessionError, SessionInner};
use crate::session::state::{ActiveSession, InitPath};

/// Cloneable capability to read and initialize the session.
///
/// Only obtainable from [`SessionManager::context`](crate::session::SessionManager::context),
/// so every holder is wired to a real manager.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

impl SessionContext {
    pub(crate) fn new(inner: Arc<SessionInner>) -> Self {
        Self { inner }
    }

    /// Current session, if authenticated.
    pub fn session(&self) -> Option<ActiveSession> {
        self.inner.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Receiver notified whenever the session is replaced.
    pub fn subscribe(&self) -> watch::Receiver<Option<ActiveSession>> {
        self.inner.subscribe()
    }

    pub async fn init_session(&self) -> Result<InitPath, SessionError> {
        self.inner.init_session().await
    }
}
