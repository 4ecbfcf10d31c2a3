//! The built statement: literal SQL text plus its ordered bind values.

use chrono::NaiveDate;

use crate::model::ParamValue;

/// One positional bind value.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Str(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
}

impl BindValue {
    /// Wire representation for backends that take JSON-typed arguments.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            BindValue::Str(s) => serde_json::Value::String(s.clone()),
            BindValue::Int(n) => serde_json::Value::from(*n),
            BindValue::Float(f) => serde_json::Value::from(*f),
            BindValue::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<ParamValue> for BindValue {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Str(s) => BindValue::Str(s),
            ParamValue::Int(n) => BindValue::Int(n),
            ParamValue::Float(f) => BindValue::Float(f),
            ParamValue::Date(d) => BindValue::Date(d),
        }
    }
}

impl From<&ParamValue> for BindValue {
    fn from(value: &ParamValue) -> Self {
        value.clone().into()
    }
}

/// A fully assembled, bind-parameterized statement ready for execution.
///
/// `sql` uses `?` placeholders; `binds` matches them positionally, in
/// append order. The text itself contains no caller-controlled substrings.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

impl BuiltQuery {
    pub fn bind_count(&self) -> usize {
        self.binds.len()
    }
}
