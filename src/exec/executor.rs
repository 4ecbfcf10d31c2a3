//! Timeout-bounded statement execution.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::backend::{QueryBackend, ResultSet};
use super::classify::ErrorClassifier;
use super::error::DriverError;
use super::QueryOutcome;
use crate::config::QuerySettings;
use crate::sql::BuiltQuery;

/// Grace added to the client-side guard so backend-side cancellation wins
/// when both fire.
const GUARD_GRACE: Duration = Duration::from_secs(2);

/// Outcome of one execution. Elapsed time is recorded on every path.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub outcome: QueryOutcome,
    pub elapsed: Duration,
    /// Present only on success.
    pub rows: Option<ResultSet>,
    /// Present only on failure; internal diagnostics, not for callers.
    pub failure: Option<DriverError>,
}

impl ExecutionResult {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

/// Runs built statements under the configured hard timeout and classifies
/// failures. Never retries: a timed-out query against an overloaded
/// backend is returned as-is.
pub struct QueryExecutor {
    backend: Arc<dyn QueryBackend>,
    classifier: Arc<dyn ErrorClassifier>,
    hard_timeout: Duration,
    soft_threshold: Duration,
}

impl QueryExecutor {
    pub fn new(
        backend: Arc<dyn QueryBackend>,
        classifier: Arc<dyn ErrorClassifier>,
        hard_timeout: Duration,
        soft_threshold: Duration,
    ) -> Self {
        Self {
            backend,
            classifier,
            hard_timeout,
            soft_threshold,
        }
    }

    pub fn from_settings(
        backend: Arc<dyn QueryBackend>,
        classifier: Arc<dyn ErrorClassifier>,
        settings: &QuerySettings,
    ) -> Self {
        Self::new(
            backend,
            classifier,
            settings.hard_timeout(),
            settings.soft_threshold(),
        )
    }

    pub fn hard_timeout(&self) -> Duration {
        self.hard_timeout
    }

    /// Execute one statement.
    ///
    /// The hard timeout is handed to the backend as the per-statement
    /// timeout; classification of a backend-side abort goes through the
    /// vendor-code classifier. A client-side guard at hard timeout plus a
    /// small grace bounds a backend that never answers at all.
    pub async fn execute(&self, query: &BuiltQuery, definition: &str) -> ExecutionResult {
        let started = Instant::now();
        let run = self.backend.run(query, self.hard_timeout);
        let outcome = tokio::time::timeout(self.hard_timeout + GUARD_GRACE, run).await;
        let elapsed = started.elapsed();
        let elapsed_ms = elapsed.as_millis() as u64;

        let result = match outcome {
            Ok(Ok(rows)) => ExecutionResult {
                outcome: QueryOutcome::Success,
                elapsed,
                rows: Some(rows),
                failure: None,
            },
            Ok(Err(err)) => {
                let outcome = self.classifier.classify(&err);
                tracing::error!(
                    report = definition,
                    outcome = outcome.as_str(),
                    code = err.code.as_deref().unwrap_or("none"),
                    elapsed_ms,
                    sql = %query.sql,
                    "report query failed: {}",
                    err.message
                );
                ExecutionResult {
                    outcome,
                    elapsed,
                    rows: None,
                    failure: Some(err),
                }
            }
            Err(_) => {
                tracing::error!(
                    report = definition,
                    elapsed_ms,
                    sql = %query.sql,
                    "backend unresponsive past the hard timeout"
                );
                ExecutionResult {
                    outcome: QueryOutcome::Timeout,
                    elapsed,
                    rows: None,
                    failure: Some(DriverError::new(
                        "statement aborted: no response within the hard timeout",
                    )),
                }
            }
        };

        if elapsed > self.soft_threshold {
            tracing::warn!(
                report = definition,
                elapsed_ms,
                threshold_ms = self.soft_threshold.as_millis() as u64,
                sql = %query.sql,
                "slow report query"
            );
        }

        result
    }
}
