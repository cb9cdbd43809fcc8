//! Canonical JSON serialization for reduced JSON++ values.
//!
//! This module provides JSON serialization with support for both compact and
//! pretty-printed output formats. Output is deterministic: object entries are
//! written in declaration order and numbers always use the same lexical form.
//!
//! # Features
//!
//! - **Compact output** via [`to_json()`] - no whitespace at all
//! - **Pretty output** via [`to_json_pretty()`] - 2-space indentation
//! - **String escaping** - delegated to `serde_json`, so control characters and
//!   raw newlines from the source come out as valid JSON escapes
//! - **Canonical numbers** - no exponent, no trailing `.0`, `-0` printed as `0`
//!
//! # Examples
//!
//! ```
//! use jsonpp::Value;
//! use jsonpp::output::{to_json, to_json_pretty};
//!
//! let value = Value::Float(2.50);
//!
//! assert_eq!(to_json(&value), "2.5");
//! assert_eq!(to_json_pretty(&value), "2.5");
//! ```

use crate::value::Value;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) => format_number(*n),
            Value::String(s) => quote(s),
            Value::Array(arr) => self.print_array(arr, indent),
            Value::Object(obj) => self.print_object(obj, indent),
        }
    }

    fn print_array(&self, arr: &[Value], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        if self.pretty {
            let mut result = "[\n".to_string();
            let items: Vec<String> = arr
                .iter()
                .map(|v| {
                    format!(
                        "{}{}",
                        self.indent(indent + 1),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            result.push_str(&items.join(",\n"));
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push(']');
            result
        } else {
            let items: Vec<String> = arr.iter().map(|v| self.print_value(v, indent)).collect();
            format!("[{}]", items.join(","))
        }
    }

    fn print_object(&self, obj: &[(String, Value)], indent: usize) -> String {
        if obj.is_empty() {
            return "{}".to_string();
        }

        if self.pretty {
            let mut result = "{\n".to_string();
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}{}: {}",
                        self.indent(indent + 1),
                        quote(k),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            result.push_str(&items.join(",\n"));
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push('}');
            result
        } else {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| format!("{}:{}", quote(k), self.print_value(v, indent)))
                .collect();
            format!("{{{}}}", items.join(","))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

/// Canonical JSON text of a floating-point number.
///
/// Finite values use the shortest decimal form that round-trips, without an
/// exponent. Non-finite values have no JSON form and print as `null`; the
/// evaluator rejects them before they get here.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        // Covers -0.0
        return "0".to_string();
    }
    n.to_string()
}

// Convenience functions

/// Converts a Value to compact JSON string representation.
///
/// # Examples
///
/// ```
/// use jsonpp::Value;
/// use jsonpp::output::to_json;
///
/// let obj = Value::Object(vec![
///     ("name".to_string(), Value::String("Alice".to_string())),
///     ("age".to_string(), Value::Integer(30)),
/// ]);
///
/// assert_eq!(to_json(&obj), r#"{"name":"Alice","age":30}"#);
/// ```
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a Value to pretty-printed JSON string representation.
///
/// # Examples
///
/// ```
/// use jsonpp::Value;
/// use jsonpp::output::to_json_pretty;
///
/// let obj = Value::Object(vec![
///     ("name".to_string(), Value::String("Alice".to_string())),
///     ("tags".to_string(), Value::Array(vec![Value::Integer(1)])),
/// ]);
///
/// assert_eq!(
///     to_json_pretty(&obj),
///     "{\n  \"name\": \"Alice\",\n  \"tags\": [\n    1\n  ]\n}"
/// );
/// ```
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}
