/// A fully reduced JSON++ value.
///
/// This is what every expression evaluates to before it is serialized. It
/// represents all JSON types, with a distinction between integers and floats
/// (unlike JSON itself, which only has "number").
///
/// # Type Preservation
///
/// - Number literals without a fractional part become `Integer`
/// - Arithmetic keeps integers while the result is exact
/// - Mixed integer/float arithmetic is done in floating point, and a whole
///   result that fits comes back as an integer
///
/// # Examples
///
/// ```
/// use jsonpp::Value;
///
/// // Scalar values
/// let null = Value::Null;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let float = Value::Float(3.14);
/// let string = Value::String("hello".to_string());
///
/// // Collections keep insertion order
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
/// let object = Value::Object(vec![("key".to_string(), Value::String("value".to_string()))]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string, escapes already decoded
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Object entries in declaration order; duplicate keys are kept
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Truthiness used by logical not.
    ///
    /// `null`, `false`, zero, NaN and the empty string are falsy. Everything
    /// else is truthy, including empty arrays and objects.
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            Null => false,
            Boolean(b) => *b,
            Float(n) => *n != 0.0 && !n.is_nan(),
            Integer(n) => *n != 0,
            String(s) => !s.is_empty(),
            Array(_) | Object(_) => true,
        }
    }

    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Human-readable type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Looks up the last entry with `key`, the way a JSON consumer resolves
    /// duplicate keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }
}
