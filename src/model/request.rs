//! Per-request inputs: tenant scope, requester context, raw parameters.

use std::collections::HashMap;
use std::fmt;

/// Raw caller-supplied search parameters, name to unparsed value.
pub type SearchParams = HashMap<String, String>;

/// Opaque identifier of the organization whose rows may be returned.
///
/// Taken from the authenticated request context only. A search parameter
/// that happens to be named `tenantId` never substitutes for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated requester context, resolved by the caller's auth layer.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Bearer token of the authenticated request.
    pub auth_token: String,

    /// Resolved user id, when the token maps to a concrete user.
    pub user_id: Option<i64>,

    /// Resolved role, matched against access rules.
    pub role: String,
}
