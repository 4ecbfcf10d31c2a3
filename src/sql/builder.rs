//! Query builder: assembles the final statement from a definition's
//! template, the bound parameters, and the mandatory scope predicates.
//!
//! Assembly is deterministic: fixed portion first, then each bound
//! parameter's clause in the definition's declared order, then the tenant
//! predicate, then the requester predicate when the access rule applies.
//! Bind values are collected in the same append order.

use crate::binder::BoundParams;
use crate::model::{ParamType, ReportDefinition, RequestContext, TenantId};

use super::query::{BindValue, BuiltQuery};

/// Splice token legal only in clauses of enum-typed parameters.
pub const VALUE_SPLICE: &str = "{value}";

/// Result type for build operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Build failure.
///
/// Every variant except `MissingUserId` indicates a malformed definition,
/// a configuration bug rather than a caller error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("clause references undeclared parameter '{0}'")]
    UndeclaredParameter(String),

    #[error("clause for parameter '{0}' has no bind or splice site")]
    UnusableClause(String),

    #[error("clause for parameter '{0}' splices a value that is not from an enumerated set")]
    SpliceOutsideAllowList(String),

    #[error("access rule requires a user id but none was supplied")]
    MissingUserId,
}

/// Assemble the statement for one request.
///
/// The tenant predicate is always appended, bound to the independently
/// supplied `tenant` — never to anything in the search parameters. The
/// requester predicate is appended when the definition's access rule
/// matches the context's role.
pub fn build(
    def: &ReportDefinition,
    bound: &BoundParams,
    tenant: &TenantId,
    ctx: &RequestContext,
) -> BuildResult<BuiltQuery> {
    let mut sql = def.base_sql.trim().to_string();
    let mut binds: Vec<BindValue> = Vec::new();

    for clause in &def.clauses {
        let spec = def
            .param(&clause.parameter)
            .ok_or_else(|| BuildError::UndeclaredParameter(clause.parameter.clone()))?;

        // Presence-driven: an unbound parameter simply omits its clause.
        let Some(value) = bound.get(&clause.parameter) else {
            continue;
        };

        let mut text = clause.sql.trim().to_string();
        let mut spliced = false;

        if text.contains(VALUE_SPLICE) {
            if !matches!(spec.ty, ParamType::Enum(_)) {
                return Err(BuildError::SpliceOutsideAllowList(clause.parameter.clone()));
            }
            let token = value
                .as_str()
                .ok_or_else(|| BuildError::SpliceOutsideAllowList(clause.parameter.clone()))?;
            text = text.replace(VALUE_SPLICE, token);
            spliced = true;
        }

        let bind_sites = text.matches('?').count();
        if bind_sites == 0 && !spliced {
            return Err(BuildError::UnusableClause(clause.parameter.clone()));
        }
        for _ in 0..bind_sites {
            binds.push(BindValue::from(value));
        }

        sql.push(' ');
        sql.push_str(&text);
    }

    sql.push_str(&format!(" AND {} = ?", def.tenant_column));
    binds.push(BindValue::Str(tenant.as_str().to_string()));

    if let Some(rule) = &def.access_rule {
        if rule.applies_to(&ctx.role) {
            let user_id = ctx.user_id.ok_or(BuildError::MissingUserId)?;
            sql.push_str(&format!(" AND {} = ?", rule.user_column));
            binds.push(BindValue::Int(user_id));
        }
    }

    Ok(BuiltQuery { sql, binds })
}
