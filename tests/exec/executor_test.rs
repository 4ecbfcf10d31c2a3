#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use reportq::exec::{
        DriverError, PostgresClassifier, QueryBackend, QueryExecutor, QueryOutcome, ResultSet,
    };
    use reportq::sql::{BindValue, BuiltQuery};

    enum Behavior {
        Rows(ResultSet),
        Fail(DriverError),
        Delay(Duration),
        Hang,
    }

    struct StubBackend {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl QueryBackend for StubBackend {
        async fn run(
            &self,
            _query: &BuiltQuery,
            _statement_timeout: Duration,
        ) -> Result<ResultSet, DriverError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Rows(rs) => Ok(rs.clone()),
                Behavior::Fail(err) => Err(err.clone()),
                Behavior::Delay(d) => {
                    tokio::time::sleep(*d).await;
                    Ok(ResultSet::default())
                }
                Behavior::Hang => {
                    std::future::pending::<()>().await;
                    Err(DriverError::new("unreachable"))
                }
            }
        }
    }

    fn query() -> BuiltQuery {
        BuiltQuery {
            sql: "SELECT licensenumber FROM eg_tl_license WHERE active = true AND tenantid = ?"
                .into(),
            binds: vec![BindValue::Str("pb.amritsar".into())],
        }
    }

    fn executor(backend: Arc<StubBackend>, hard: Duration, soft: Duration) -> QueryExecutor {
        QueryExecutor::new(backend, Arc::new(PostgresClassifier), hard, soft)
    }

    #[tokio::test]
    async fn test_success_returns_rows_and_elapsed() {
        let rows = ResultSet {
            columns: vec!["licensenumber".into()],
            rows: vec![vec![serde_json::json!("TL-2024-01")]],
        };
        let backend = StubBackend::new(Behavior::Rows(rows.clone()));
        let exec = executor(
            backend,
            Duration::from_secs(1),
            Duration::from_secs(1),
        );

        let result = exec.execute(&query(), "TradeLicenseSummary").await;

        assert_eq!(result.outcome, QueryOutcome::Success);
        assert_eq!(result.rows, Some(rows));
        assert!(result.failure.is_none());
    }

    #[tokio::test]
    async fn test_query_canceled_code_classifies_as_timeout() {
        let backend = StubBackend::new(Behavior::Fail(DriverError::with_code(
            "57014",
            "canceling statement due to statement timeout",
        )));
        let exec = executor(backend, Duration::from_secs(1), Duration::from_secs(1));

        let result = exec.execute(&query(), "TradeLicenseSummary").await;

        assert_eq!(result.outcome, QueryOutcome::Timeout);
        assert!(result.rows.is_none());
        assert_eq!(result.failure.unwrap().code.as_deref(), Some("57014"));
    }

    #[tokio::test]
    async fn test_other_driver_error_classifies_as_execution_failure() {
        let backend = StubBackend::new(Behavior::Fail(DriverError::with_code(
            "42P01",
            "relation does not exist",
        )));
        let exec = executor(backend, Duration::from_secs(1), Duration::from_secs(1));

        let result = exec.execute(&query(), "TradeLicenseSummary").await;

        assert_eq!(result.outcome, QueryOutcome::ExecutionFailure);
        assert!(result.failure.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresponsive_backend_is_bounded_by_the_guard() {
        let backend = StubBackend::new(Behavior::Hang);
        let exec = executor(
            backend.clone(),
            Duration::from_millis(100),
            Duration::from_millis(100),
        );

        let result = exec.execute(&query(), "TradeLicenseSummary").await;

        assert_eq!(result.outcome, QueryOutcome::Timeout);
        assert!(result.rows.is_none());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exceeding_only_the_soft_threshold_still_succeeds() {
        let backend = StubBackend::new(Behavior::Delay(Duration::from_millis(30)));
        let exec = executor(
            backend,
            Duration::from_secs(5),
            Duration::from_millis(1),
        );

        let result = exec.execute(&query(), "TradeLicenseSummary").await;

        assert_eq!(result.outcome, QueryOutcome::Success);
        assert!(result.elapsed >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_elapsed_is_recorded_on_failure() {
        let backend = StubBackend::new(Behavior::Fail(DriverError::new("connection reset")));
        let exec = executor(backend, Duration::from_secs(1), Duration::from_secs(1));

        let result = exec.execute(&query(), "TradeLicenseSummary").await;

        assert_eq!(result.outcome, QueryOutcome::ExecutionFailure);
        assert!(result.elapsed_ms() < 1_000);
    }
}
