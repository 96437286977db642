//! Published session state.

use std::fmt;
use std::sync::Arc;

use crate::blockchain::client::Session;
use crate::blockchain::types::{AccountId, ChainResult, QueryRequest};

/// Per-process identity of a stored session.
///
/// Assigned when the session manager publishes a session; strictly
/// increasing, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Which branch of initialization produced the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPath {
    Login,
    Registration,
}

impl InitPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitPath::Login => "login",
            InitPath::Registration => "registration",
        }
    }
}

/// The live session as seen by consumers.
#[derive(Clone)]
pub struct ActiveSession {
    id: SessionId,
    session: Arc<dyn Session>,
}

impl ActiveSession {
    pub(crate) fn new(id: SessionId, session: Arc<dyn Session>) -> Self {
        Self { id, session }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn account_id(&self) -> &AccountId {
        self.session.account_id()
    }

    /// The underlying collaborator session.
    pub fn handle(&self) -> &Arc<dyn Session> {
        &self.session
    }

    pub async fn query(&self, request: &QueryRequest) -> ChainResult<serde_json::Value> {
        self.session.query(request).await
    }
}

impl fmt::Debug for ActiveSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveSession")
            .field("id", &self.id)
            .field("account_id", &self.account_id().to_string())
            .finish()
    }
}
