//! Parameter declarations and typed values.

use chrono::NaiveDate;
use serde::Deserialize;

/// Declared type of a report parameter.
///
/// The `Enum` variant carries its static allow-list; it is the only
/// parameter type whose value may ever be spliced into SQL text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "allowed", rename_all = "lowercase")]
pub enum ParamType {
    /// Free-form string, always bound.
    Str,
    /// Integer or decimal number.
    Number,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// One of a fixed set of allowed values.
    Enum(Vec<String>),
}

impl ParamType {
    /// Human-readable label used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            ParamType::Str => "string",
            ParamType::Number => "number",
            ParamType::Date => "date (YYYY-MM-DD)",
            ParamType::Enum(_) => "one of the allowed values",
        }
    }

    /// Convert a raw request value to a typed value.
    ///
    /// Returns `None` when the raw text does not conform to this type.
    pub fn convert(&self, raw: &str) -> Option<ParamValue> {
        match self {
            ParamType::Str => Some(ParamValue::Str(raw.to_string())),
            ParamType::Number => {
                if let Ok(n) = raw.parse::<i64>() {
                    return Some(ParamValue::Int(n));
                }
                raw.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(ParamValue::Float)
            }
            ParamType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(ParamValue::Date),
            ParamType::Enum(allowed) => allowed
                .iter()
                .find(|v| v.as_str() == raw)
                .map(|v| ParamValue::Str(v.clone())),
        }
    }
}

/// A validated, typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
}

impl ParamValue {
    /// The allow-listed text of an enum value, if this value came from one.
    ///
    /// Only the binder produces `ParamValue`s, so a `Str` bound under an
    /// `Enum` spec is guaranteed to be a member of the allow-list.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Declaration of one report parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterSpec {
    /// Name looked up in the caller's search parameters.
    pub name: String,

    /// Declared type, governing conversion.
    #[serde(flatten)]
    pub ty: ParamType,

    /// Whether a request without this parameter is rejected.
    #[serde(default)]
    pub required: bool,

    /// Raw default value bound when the caller omits the parameter.
    #[serde(default)]
    pub default: Option<String>,
}
