//! Report definitions: the registered description of one queryable report.

use serde::Deserialize;

use super::params::ParameterSpec;

/// One optional filter clause, appended when its parameter is bound.
///
/// Within `sql`, each `?` binds the parameter's value; the literal token
/// `{value}` splices the validated value as text and is legal only for
/// enum-typed parameters (their values come from a static allow-list).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClauseTemplate {
    /// Declared parameter this clause belongs to.
    pub parameter: String,

    /// Clause text, e.g. `AND status = ?`.
    pub sql: String,
}

/// Row-level access rule: for the listed roles, results are restricted to
/// rows the requester created.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccessRule {
    /// Roles the restriction applies to.
    pub roles: Vec<String>,

    /// Column holding the owning user id.
    pub user_column: String,
}

impl AccessRule {
    /// Whether this rule restricts the given role.
    pub fn applies_to(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// A registered report definition.
///
/// Immutable after registration; shared read-only across requests.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportDefinition {
    /// Registered name, the lookup key for requests.
    pub name: String,

    /// Owning platform module (e.g. `tradelicense`).
    pub module: String,

    /// Fixed portion of the statement. Must contain a `WHERE` section so
    /// scoping predicates can be appended with `AND`.
    pub base_sql: String,

    /// Optional clauses in declared order.
    #[serde(default)]
    pub clauses: Vec<ClauseTemplate>,

    /// Declared parameters in declared order.
    #[serde(default)]
    pub params: Vec<ParameterSpec>,

    /// Column the mandatory tenant predicate binds against.
    #[serde(default = "default_tenant_column")]
    pub tenant_column: String,

    /// Row-level access rule, if any.
    #[serde(default)]
    pub access_rule: Option<AccessRule>,
}

fn default_tenant_column() -> String {
    "tenantid".to_string()
}

impl ReportDefinition {
    /// Look up a declared parameter by name.
    pub fn param(&self, name: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}
