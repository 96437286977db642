//! Session and query metrics.
//!
//! # Metrics
//! - `session_init_total` (counter): initialization attempts by outcome
//! - `query_executions_total` (counter): query executions by query, outcome

use metrics::counter;

/// Record the outcome of a session initialization attempt.
pub fn record_session_init(outcome: &'static str) {
    counter!("session_init_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of one query execution.
pub fn record_query(query: &str, outcome: &'static str) {
    counter!(
        "query_executions_total",
        "query" => query.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
