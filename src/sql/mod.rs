//! SQL assembly.
//!
//! This module owns the statement text and its bind list:
//!
//! - [`query`] - `BuiltQuery` and `BindValue`
//! - [`builder`] - template assembly with mandatory tenant/requester scope
//!
//! Caller-controlled values never enter the text here; they travel as bind
//! values, or as allow-listed tokens already validated by the binder.

pub mod builder;
pub mod query;

pub use builder::{build, BuildError};
pub use query::{BindValue, BuiltQuery};
