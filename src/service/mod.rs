//! Report service: wires binder → builder → executor and maps outcomes to
//! the external response.
//!
//! Per-request flow is single-shot and linear; no state is revisited. The
//! only cross-request state is the failure tracker consulted before each
//! admit.

use std::sync::Arc;

use uuid::Uuid;

use crate::binder::bind;
use crate::config::Settings;
use crate::exec::{
    ErrorClassifier, FailureTracker, QueryBackend, QueryExecutor, QueryOutcome,
};
use crate::model::{DefinitionRegistry, RequestContext, SearchParams, TenantId};
use crate::sql::{build, BuildError};

/// One report request, as received from the transport layer.
///
/// `tenant_id`, `user_id` and `role` come from the authenticated request
/// context, not from the caller-editable search parameters.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub tenant_id: String,
    pub search_params: SearchParams,
    pub report_name: String,
    pub auth_token: String,
    pub user_id: Option<i64>,
    pub role: String,
}

/// Successful report result.
#[derive(Debug, Clone)]
pub struct ReportResponse {
    /// Ordered rows, each an ordered column → value mapping.
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
    pub elapsed_ms: u64,
}

/// External failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-fixable request problem.
    InvalidParameter,
    /// Malformed definition, an operator-visible configuration bug.
    TemplateError,
    /// The statement exceeded its time budget; transient backend overload.
    QueryExecutionTimeout,
    /// Any other backend or connectivity failure.
    ExecutionFailure,
    /// The definition's circuit breaker is open.
    ReportDisabled,
}

impl ErrorKind {
    /// Wire label for the external failure response.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidParameter => "INVALID_PARAMETER",
            ErrorKind::TemplateError => "TEMPLATE_ERROR",
            ErrorKind::QueryExecutionTimeout => "QUERY_EXECUTION_TIMEOUT",
            ErrorKind::ExecutionFailure => "EXECUTION_FAILURE",
            ErrorKind::ReportDisabled => "REPORT_DISABLED",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified failure returned to the external caller.
///
/// The message is sanitized: raw driver text and generated SQL stay in
/// internal logs only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ReportError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ReportError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Orchestrator over a shared registry, executor, and failure tracker.
pub struct ReportService {
    registry: Arc<DefinitionRegistry>,
    executor: QueryExecutor,
    breaker: FailureTracker,
}

impl ReportService {
    pub fn new(
        registry: Arc<DefinitionRegistry>,
        backend: Arc<dyn QueryBackend>,
        classifier: Arc<dyn ErrorClassifier>,
        settings: &Settings,
    ) -> Self {
        Self {
            registry,
            executor: QueryExecutor::from_settings(backend, classifier, &settings.query),
            breaker: FailureTracker::from_settings(&settings.breaker),
        }
    }

    /// Run one report request end to end.
    pub async fn run_report(&self, request: &ReportRequest) -> Result<ReportResponse, ReportError> {
        let request_id = Uuid::new_v4();

        let Some(def) = self.registry.get(&request.report_name) else {
            return Err(ReportError::new(
                ErrorKind::InvalidParameter,
                format!("unknown report: reportName '{}'", request.report_name),
            ));
        };

        if self.breaker.is_disabled(&def.name) {
            tracing::warn!(
                %request_id,
                report = %def.name,
                failures = self.breaker.failures(&def.name),
                "report disabled by circuit breaker"
            );
            return Err(ReportError::new(
                ErrorKind::ReportDisabled,
                format!("report '{}' is temporarily disabled after repeated failures", def.name),
            ));
        }

        let bound = bind(&def, &request.search_params)
            .map_err(|e| ReportError::new(ErrorKind::InvalidParameter, e.to_string()))?;

        let tenant = TenantId::new(&request.tenant_id);
        let ctx = RequestContext {
            auth_token: request.auth_token.clone(),
            user_id: request.user_id,
            role: request.role.clone(),
        };

        let query = build(&def, &bound, &tenant, &ctx).map_err(|e| match e {
            BuildError::MissingUserId => ReportError::new(
                ErrorKind::InvalidParameter,
                "userId is required for this report",
            ),
            other => {
                tracing::error!(%request_id, report = %def.name, "malformed definition: {other}");
                ReportError::new(
                    ErrorKind::TemplateError,
                    format!("report '{}' is misconfigured", def.name),
                )
            }
        })?;

        let result = self.executor.execute(&query, &def.name).await;
        self.breaker.record_outcome(&def.name, result.outcome);

        tracing::info!(
            %request_id,
            report = %def.name,
            tenant = %tenant,
            outcome = result.outcome.as_str(),
            elapsed_ms = result.elapsed_ms(),
            "report request finished"
        );

        match result.outcome {
            QueryOutcome::Success => {
                let elapsed_ms = result.elapsed_ms();
                let rows = result.rows.unwrap_or_default();
                Ok(ReportResponse {
                    rows: rows.rows_as_maps(),
                    elapsed_ms,
                })
            }
            QueryOutcome::Timeout => Err(ReportError::new(
                ErrorKind::QueryExecutionTimeout,
                "report query exceeded the statement timeout",
            )),
            QueryOutcome::ExecutionFailure => {
                let code = result
                    .failure
                    .as_ref()
                    .and_then(|f| f.code.as_deref())
                    .unwrap_or("unknown");
                Err(ReportError::new(
                    ErrorKind::ExecutionFailure,
                    format!("report query failed (driver code {code})"),
                ))
            }
        }
    }
}
