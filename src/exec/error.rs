//! Driver failure type.

/// Failure reported by a database driver or connection.
///
/// `code` carries the vendor error code (SQLSTATE for Postgres-family
/// backends) when the driver supplied one; classification keys off it.
/// The message is internal diagnostic text and must never reach an
/// external caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DriverError {
    pub code: Option<String>,
    pub message: String,
}

impl DriverError {
    /// Failure without a vendor code (connectivity, protocol).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Failure carrying a vendor error code.
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}
