//! The backend seam: the collaborator that owns a pooled connection.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::error::DriverError;
use crate::sql::BuiltQuery;

/// Rows returned by one statement.
///
/// Columns are ordered as selected; each row is positionally aligned with
/// `columns`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultSet {
    /// Column names or aliases, in select order.
    pub columns: Vec<String>,
    /// Result data rows.
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl ResultSet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows as ordered column → value mappings, the external response shape.
    pub fn rows_as_maps(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

/// Executes one built statement on a connection obtained from an external
/// pool.
///
/// Implementations must apply `statement_timeout` as the per-statement
/// timeout before running the query, so that the backend itself aborts an
/// overrunning statement and reports its vendor cancellation code. Pool
/// sizing and transactions are outside this seam.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    async fn run(
        &self,
        query: &BuiltQuery,
        statement_timeout: Duration,
    ) -> Result<ResultSet, DriverError>;
}
