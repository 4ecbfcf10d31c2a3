//! # Reportq
//!
//! A metadata-driven reporting query engine. Registered, declarative report
//! definitions plus caller-supplied search parameters become safe,
//! parameterized SQL, executed against a relational backend under a hard
//! time budget, with failures classified for callers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        ReportDefinition (registered configuration)       │
//! │   (base template, clause list, parameter specs, scope)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [binder]
//! ┌─────────────────────────────────────────────────────────┐
//! │              BoundParams (validated, typed)              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [builder + tenant/requester scope]
//! ┌─────────────────────────────────────────────────────────┐
//! │          BuiltQuery (SQL text + ordered binds)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [executor, hard timeout]
//! ┌─────────────────────────────────────────────────────────┐
//! │     ExecutionResult (rows | classified failure)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! New reports are added by configuration, not code: the builder fills a
//! fixed template grammar, never parses or accepts arbitrary SQL from
//! callers. Caller-controlled values reach the statement only as bind
//! values, or as allow-listed tokens declared in the definition.

pub mod binder;
pub mod config;
pub mod exec;
pub mod model;
pub mod service;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::binder::{bind, BindError, BoundParams};
    pub use crate::config::Settings;
    pub use crate::exec::{
        DriverError, ErrorClassifier, ExecutionResult, FailureTracker, PostgresClassifier,
        QueryBackend, QueryExecutor, QueryOutcome, ResultSet,
    };
    pub use crate::model::{
        AccessRule, ClauseTemplate, DefinitionRegistry, ParamType, ParamValue, ParameterSpec,
        ReportDefinition, RequestContext, SearchParams, TenantId,
    };
    pub use crate::service::{ErrorKind, ReportError, ReportRequest, ReportResponse, ReportService};
    pub use crate::sql::{build, BindValue, BuildError, BuiltQuery};
}

// Also export the workhorse types at the crate root
pub use config::Settings;
pub use model::{DefinitionRegistry, ReportDefinition};
pub use service::{ReportError, ReportRequest, ReportResponse, ReportService};
pub use sql::BuiltQuery;
