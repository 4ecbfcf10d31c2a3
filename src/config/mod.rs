//! Runtime configuration.
//!
//! Handles the execution-time settings surface: statement timeouts and the
//! per-definition circuit breaker.

mod settings;

pub use settings::{BreakerSettings, QuerySettings, Settings, SettingsError};
