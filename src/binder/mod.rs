//! Parameter binder: validates raw search parameters against a definition's
//! declared parameter set and produces typed values.
//!
//! Unknown parameter names are ignored. A declared parameter is bound from
//! the request value, or from its declared default when the request omits
//! it; a required parameter with neither fails the bind.

use crate::model::{ParamValue, ReportDefinition, SearchParams};

/// Result type for bind operations.
pub type BindResult<T> = Result<T, BindError>;

/// Caller-fixable parameter validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("missing required parameter '{0}'")]
    MissingRequired(String),

    #[error("invalid value for parameter '{name}': expected {expected}")]
    InvalidValue {
        name: String,
        expected: &'static str,
    },
}

impl BindError {
    /// Name of the offending parameter.
    pub fn parameter(&self) -> &str {
        match self {
            BindError::MissingRequired(name) => name,
            BindError::InvalidValue { name, .. } => name,
        }
    }
}

/// Typed parameter values in the definition's declared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    values: Vec<(String, ParamValue)>,
}

impl BoundParams {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound (name, value) pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Validate and convert raw search parameters against a definition.
pub fn bind(def: &ReportDefinition, params: &SearchParams) -> BindResult<BoundParams> {
    let mut values = Vec::new();

    for spec in &def.params {
        let raw = params
            .get(&spec.name)
            .map(String::as_str)
            .or(spec.default.as_deref());

        let Some(raw) = raw else {
            if spec.required {
                return Err(BindError::MissingRequired(spec.name.clone()));
            }
            continue;
        };

        let value = spec.ty.convert(raw).ok_or_else(|| BindError::InvalidValue {
            name: spec.name.clone(),
            expected: spec.ty.label(),
        })?;
        values.push((spec.name.clone(), value));
    }

    Ok(BoundParams { values })
}
