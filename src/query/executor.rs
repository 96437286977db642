//! Reactive query execution.
//!
//! # Responsibilities
//! - Run a named query against the live session
//! - Re-run it when the session, query name, or arguments change
//! - Keep the latest successful result; failures leave it untouched
//!
//! Every firing launches its own task. Each execution carries a sequence
//! number and a response is applied only if no newer request has completed
//! already, successfully or not, so a slow old response never overwrites
//! the outcome of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::blockchain::types::{ChainError, QueryRequest};
use crate::observability::metrics;
use crate::query::args::QueryArgs;
use crate::session::{ActiveSession, SessionContext, SessionId};

/// Why a single execution produced no result.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("Failed to decode query response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
struct Inputs {
    name: String,
    args: Option<QueryArgs>,
}

/// Identity of a sent request for change detection.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestKey {
    session: SessionId,
    name: String,
    args: String,
}

struct Applied<T> {
    /// Highest sequence number that has completed, including failures.
    completed: u64,
    value: Option<T>,
}

struct Execution {
    seq: u64,
    session: ActiveSession,
    request: QueryRequest,
}

struct Shared<T> {
    last_sent: Mutex<Option<RequestKey>>,
    next_seq: AtomicU64,
    result: watch::Sender<Applied<T>>,
}

impl<T> Shared<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Decide whether the inputs warrant a send. `force` skips change detection.
    fn prepare(
        &self,
        session: Option<ActiveSession>,
        inputs: &Inputs,
        force: bool,
    ) -> Option<Execution> {
        let Some(session) = session else {
            tracing::trace!(query = %inputs.name, "No session, query not sent");
            return None;
        };
        let Some(args) = inputs.args.clone() else {
            tracing::trace!(query = %inputs.name, "No arguments, query not sent");
            return None;
        };

        let key = RequestKey {
            session: session.id(),
            name: inputs.name.clone(),
            args: args.canonical(),
        };

        {
            let mut last_sent = self.last_sent.lock().unwrap_or_else(PoisonError::into_inner);
            if !force && last_sent.as_ref() == Some(&key) {
                tracing::trace!(query = %inputs.name, "Inputs unchanged, query not sent");
                return None;
            }
            *last_sent = Some(key);
        }

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        Some(Execution {
            seq,
            session,
            request: QueryRequest {
                name: inputs.name.clone(),
                args,
            },
        })
    }

    async fn execute(&self, execution: Execution) {
        let Execution {
            seq,
            session,
            request,
        } = execution;
        tracing::debug!(query = %request.name, seq, session_id = %session.id(), "Sending query");

        match fetch::<T>(&session, &request).await {
            Ok(value) => {
                let applied = self.result.send_if_modified(|current| {
                    if seq > current.completed {
                        current.completed = seq;
                        current.value = Some(value);
                        true
                    } else {
                        false
                    }
                });
                if applied {
                    metrics::record_query(&request.name, "ok");
                } else {
                    tracing::debug!(query = %request.name, seq, "Discarding superseded response");
                    metrics::record_query(&request.name, "superseded");
                }
            }
            Err(e) => {
                tracing::error!(query = %request.name, seq, error = %e, "Query failed");
                metrics::record_query(&request.name, "error");
                // Older in-flight responses must not land after this one failed.
                self.result.send_if_modified(|current| {
                    current.completed = current.completed.max(seq);
                    false
                });
            }
        }
    }
}

async fn fetch<T: DeserializeOwned>(
    session: &ActiveSession,
    request: &QueryRequest,
) -> Result<T, QueryError> {
    let raw = session.query(request).await?;
    Ok(serde_json::from_value(raw)?)
}

/// A named query kept in sync with its inputs and the session.
///
/// Dropping it stops the watcher; executions already in flight still
/// complete.
pub struct Query<T> {
    context: SessionContext,
    inputs: watch::Sender<Inputs>,
    shared: Arc<Shared<T>>,
    watcher: JoinHandle<()>,
}

impl<T> Query<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Start watching; the first firing happens immediately.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime, since the watcher is
    /// spawned with `tokio::spawn`.
    pub fn new(context: &SessionContext, name: impl Into<String>, args: Option<QueryArgs>) -> Self {
        let (inputs, inputs_rx) = watch::channel(Inputs {
            name: name.into(),
            args,
        });
        let (result, _) = watch::channel(Applied {
            completed: 0,
            value: None,
        });
        let shared = Arc::new(Shared {
            last_sent: Mutex::new(None),
            next_seq: AtomicU64::new(0),
            result,
        });

        let watcher = tokio::spawn(watch_inputs(
            shared.clone(),
            inputs_rx,
            context.subscribe(),
        ));

        Self {
            context: context.clone(),
            inputs,
            shared,
            watcher,
        }
    }

    /// Replace the arguments. Arguments equal by value are not a change.
    pub fn set_args(&self, args: Option<QueryArgs>) {
        let canonical = args.as_ref().map(QueryArgs::canonical);
        self.inputs.send_if_modified(|current| {
            if current.args.as_ref().map(QueryArgs::canonical) == canonical {
                return false;
            }
            current.args = args;
            true
        });
    }

    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.inputs.send_if_modified(|current| {
            if current.name == name {
                return false;
            }
            current.name = name;
            true
        });
    }

    /// Execute now with the current inputs, ignoring change detection.
    ///
    /// Still a no-op without a session or arguments.
    pub async fn reload(&self) {
        let inputs = self.inputs.borrow().clone();
        if let Some(execution) = self.shared.prepare(self.context.session(), &inputs, true) {
            self.shared.execute(execution).await;
        }
    }

    /// Latest applied result.
    pub fn get(&self) -> Option<T> {
        self.shared.result.borrow().value.clone()
    }

    /// Live handle to the result.
    pub fn result(&self) -> QueryResult<T> {
        QueryResult {
            rx: self.shared.result.subscribe(),
        }
    }

    pub fn name(&self) -> String {
        self.inputs.borrow().name.clone()
    }

    pub fn args(&self) -> Option<QueryArgs> {
        self.inputs.borrow().args.clone()
    }
}

impl<T> Drop for Query<T> {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

async fn watch_inputs<T>(
    shared: Arc<Shared<T>>,
    mut inputs: watch::Receiver<Inputs>,
    mut session: watch::Receiver<Option<ActiveSession>>,
) where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    loop {
        let current = inputs.borrow_and_update().clone();
        let active = session.borrow_and_update().clone();

        if let Some(execution) = shared.prepare(active, &current, false) {
            let shared = shared.clone();
            tokio::spawn(async move { shared.execute(execution).await });
        }

        tokio::select! {
            changed = inputs.changed() => if changed.is_err() { break },
            changed = session.changed() => if changed.is_err() { break },
        }
    }
}

/// Read side of a query's result.
pub struct QueryResult<T> {
    rx: watch::Receiver<Applied<T>>,
}

impl<T: Clone> QueryResult<T> {
    pub fn get(&self) -> Option<T> {
        self.rx.borrow().value.clone()
    }

    /// Wait for the next applied result. Returns `false` once the query is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

impl<T> Clone for QueryResult<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}
