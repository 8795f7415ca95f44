//! Settings values and variable resolution.
//!
//! Settings arrive as JSON (from the config file or the command line), but the
//! evaluators only ever see a [`SettingValue`], so every directive has to
//! handle each kind of value explicitly, including a missing one.

use indexmap::IndexMap;
use serde_json::{Number, Value};

/// Per-render variable bindings, keyed by variable name.
pub type Settings = IndexMap<String, Value>;

/// A variable's value as seen by the directive evaluators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue<'a> {
    Str(&'a str),
    Bool(bool),
    Number(&'a Number),
    /// The variable is not bound in the settings.
    Absent,
    /// The variable is bound to a JSON value that has no textual form
    /// (`null`, an array or an object).
    Unsupported(&'static str),
}

impl SettingValue<'_> {
    /// Human readable name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Str(_) => "string",
            SettingValue::Bool(_) => "boolean",
            SettingValue::Number(_) => "number",
            SettingValue::Absent => "unresolved",
            SettingValue::Unsupported(kind) => *kind,
        }
    }
}

impl<'a> From<&'a Value> for SettingValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(s) => SettingValue::Str(s),
            Value::Bool(b) => SettingValue::Bool(*b),
            Value::Number(n) => SettingValue::Number(n),
            Value::Null => SettingValue::Unsupported("null"),
            Value::Array(_) => SettingValue::Unsupported("array"),
            Value::Object(_) => SettingValue::Unsupported("object"),
        }
    }
}

/// Looks up `name` in `settings`.
///
/// A missing key is not an error here; it resolves to [`SettingValue::Absent`]
/// and the evaluator decides whether it can live with that.
pub fn resolve<'a>(settings: &'a Settings, name: &str) -> SettingValue<'a> {
    settings.get(name).map(SettingValue::from).unwrap_or(SettingValue::Absent)
}

/// Formats a number in its shortest decimal form that reads back to the same
/// value. Integers print without a fractional part, floats never use an
/// exponent.
pub fn format_number(number: &Number) -> String {
    if let Some(i) = number.as_i64() {
        i.to_string()
    } else if let Some(u) = number.as_u64() {
        u.to_string()
    } else {
        number.as_f64().map(|f| f.to_string()).unwrap_or_else(|| number.to_string())
    }
}
