//! Driver-error classification.
//!
//! Timeout detection is vendor-specific (an error code meaning "query
//! canceled", not a wall-clock comparison), so it lives behind a trait:
//! alternate storage backends supply their own classifier without touching
//! executor control flow.

use super::error::DriverError;
use super::QueryOutcome;

/// Postgres SQLSTATE for a statement canceled by `statement_timeout`.
pub const QUERY_CANCELED: &str = "57014";

/// Maps a driver failure to a terminal outcome.
pub trait ErrorClassifier: Send + Sync {
    fn classify(&self, err: &DriverError) -> QueryOutcome;
}

/// Classifier for Postgres-family backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresClassifier;

impl ErrorClassifier for PostgresClassifier {
    fn classify(&self, err: &DriverError) -> QueryOutcome {
        match err.code.as_deref() {
            Some(QUERY_CANCELED) => QueryOutcome::Timeout,
            _ => QueryOutcome::ExecutionFailure,
        }
    }
}
