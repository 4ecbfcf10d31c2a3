//! Report definition model.
//!
//! Definitions are registered once at startup and shared immutable across
//! all concurrent requests; nothing in this module mutates after load.

pub mod definition;
pub mod params;
pub mod registry;
pub mod request;

pub use definition::{AccessRule, ClauseTemplate, ReportDefinition};
pub use params::{ParamType, ParamValue, ParameterSpec};
pub use registry::{DefinitionRegistry, RegistryError};
pub use request::{RequestContext, SearchParams, TenantId};
