//! Conversion from jsonpp values to `serde_json` values

use crate::Value;

/// Convert a jsonpp Value to serde_json::Value
///
/// Duplicate object keys collapse to the last one listed, as any JSON
/// consumer would read them.
pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.into_iter().map(|(k, v)| (k, value_to_json(v))).collect(),
        ),
    }
}
