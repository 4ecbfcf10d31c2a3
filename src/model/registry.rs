//! Definition registry: load-once, read-only store of report definitions.
//!
//! Every definition is validated at registration so that template bugs
//! surface at startup rather than as per-request failures.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::definition::ReportDefinition;
use super::params::ParamType;
use crate::sql::builder::VALUE_SPLICE;

/// Bare or schema-qualified SQL identifier.
static IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$").expect("valid regex")
});

/// Error type for registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("report '{0}' is already registered")]
    Duplicate(String),

    #[error("report '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },

    #[error("failed to read definition file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse definition file: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
struct DefinitionFile {
    #[serde(default, rename = "report")]
    reports: Vec<ReportDefinition>,
}

/// Registry of report definitions, keyed by name.
///
/// Populated once at startup, then shared immutable (wrap in `Arc`).
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    defs: HashMap<String, Arc<ReportDefinition>>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `[[report]]` table from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and register every `[[report]]` table in a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let file: DefinitionFile = toml::from_str(content)?;
        let mut registry = Self::new();
        for def in file.reports {
            registry.register(def)?;
        }
        Ok(registry)
    }

    /// Validate and register one definition.
    pub fn register(&mut self, def: ReportDefinition) -> Result<(), RegistryError> {
        if self.defs.contains_key(&def.name) {
            return Err(RegistryError::Duplicate(def.name));
        }
        if let Err(reason) = validate(&def) {
            return Err(RegistryError::InvalidDefinition {
                name: def.name,
                reason,
            });
        }
        self.defs.insert(def.name.clone(), Arc::new(def));
        Ok(())
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<Arc<ReportDefinition>> {
        self.defs.get(name).cloned()
    }

    /// Registered definition names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Structural validation of one definition.
fn validate(def: &ReportDefinition) -> Result<(), String> {
    if def.name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    if !def.base_sql.to_ascii_lowercase().contains("where") {
        return Err(
            "base_sql must contain a WHERE section so scoping predicates can be appended"
                .to_string(),
        );
    }
    if !IDENT_RE.is_match(&def.tenant_column) {
        return Err(format!(
            "tenant_column '{}' is not a bare identifier",
            def.tenant_column
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for spec in &def.params {
        if !seen.insert(spec.name.as_str()) {
            return Err(format!("parameter '{}' is declared twice", spec.name));
        }
        if let ParamType::Enum(allowed) = &spec.ty {
            if allowed.is_empty() {
                return Err(format!(
                    "parameter '{}' has an empty allow-list",
                    spec.name
                ));
            }
        }
        if let Some(default) = &spec.default {
            if spec.ty.convert(default).is_none() {
                return Err(format!(
                    "default '{}' for parameter '{}' is not a valid {}",
                    default,
                    spec.name,
                    spec.ty.label()
                ));
            }
        }
    }

    for clause in &def.clauses {
        let Some(spec) = def.param(&clause.parameter) else {
            return Err(format!(
                "clause references undeclared parameter '{}'",
                clause.parameter
            ));
        };
        let has_splice = clause.sql.contains(VALUE_SPLICE);
        if has_splice && !matches!(spec.ty, ParamType::Enum(_)) {
            return Err(format!(
                "clause for '{}' uses {} but the parameter is not an enumerated set",
                clause.parameter, VALUE_SPLICE
            ));
        }
        if !has_splice && !clause.sql.contains('?') {
            return Err(format!(
                "clause for '{}' has no bind or splice site",
                clause.parameter
            ));
        }
    }

    if let Some(rule) = &def.access_rule {
        if rule.roles.is_empty() {
            return Err("access_rule.roles must not be empty".to_string());
        }
        if !IDENT_RE.is_match(&rule.user_column) {
            return Err(format!(
                "access_rule.user_column '{}' is not a bare identifier",
                rule.user_column
            ));
        }
    }

    Ok(())
}
