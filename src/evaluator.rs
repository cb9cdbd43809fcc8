use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, Literal, Position, Token, UnaryOp},
    output::{JsonPrinter, format_number},
    parser::DEFAULT_MAX_DEPTH,
    value::Value,
};

/// Errors that can occur while reducing a syntax tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Operator applied to an operand of the wrong type
    #[error("Type error at {position}: {message}")]
    TypeError { message: String, position: Position },

    /// Division with a zero divisor
    #[error("Division by zero at {position}")]
    DivisionByZero { position: Position },

    /// Result overflowed to infinity, which JSON cannot represent
    #[error("Result of '{operator}' at {position} is not a finite number")]
    NonFinite {
        operator: &'static str,
        position: Position,
    },

    /// Exponentiation without a real result, e.g. a negative base with a
    /// fractional exponent
    #[error("Result of '^' at {position} is not a real number")]
    NotReal { position: Position },

    #[error("Nesting too deep at {position}: maximum depth is {max_depth}")]
    NestingTooDeep { max_depth: usize, position: Position },
}

impl EvalError {
    pub fn position(&self) -> Position {
        match self {
            EvalError::TypeError { position, .. }
            | EvalError::DivisionByZero { position }
            | EvalError::NonFinite { position, .. }
            | EvalError::NotReal { position }
            | EvalError::NestingTooDeep { position, .. } => *position,
        }
    }

    fn type_error(message: String, token: &Token) -> Self {
        EvalError::TypeError {
            message,
            position: token.position,
        }
    }
}

/// Reduces a syntax tree to a [`Value`] and serializes it.
///
/// The evaluator holds configuration only; every call walks the tree it is
/// given and keeps no state between calls.
#[derive(Debug, Clone)]
pub struct Evaluator {
    max_depth: usize,
    pretty: bool,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator {
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: false,
        }
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Evaluates an expression to its typed value.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonpp::{Evaluator, Value};
    /// use jsonpp::parser::parse;
    ///
    /// let expr = parse("(2 + 3) * 4").unwrap();
    /// let value = Evaluator::new().eval(&expr).unwrap();
    /// assert_eq!(value, Value::Integer(20));
    /// ```
    pub fn eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        self.eval_expr(expr, 1)
    }

    /// Evaluates an expression and serializes the result as JSON text.
    pub fn compile(&self, expr: &Expr) -> Result<String, EvalError> {
        let value = self.eval(expr)?;
        Ok(JsonPrinter::new(self.pretty).print(&value))
    }

    fn eval_expr(&self, expr: &Expr, depth: usize) -> Result<Value, EvalError> {
        if depth > self.max_depth {
            return Err(EvalError::NestingTooDeep {
                max_depth: self.max_depth,
                position: expr.position(),
            });
        }

        match expr {
            Expr::Literal { value, .. } => Ok(match value {
                Literal::String(s) => Value::String(s.clone()),
                Literal::Integer(n) => Value::Integer(*n),
                Literal::Float(n) => Value::Float(*n),
                Literal::Boolean(b) => Value::Boolean(*b),
                Literal::Null => Value::Null,
            }),
            Expr::Unary { op, operand, token } => {
                let value = self.eval_expr(operand, depth + 1)?;
                apply_unary(*op, value, token)
            }
            Expr::Binary { .. } => self.eval_chain(expr, depth),
            Expr::Array { elements, .. } => {
                let mut arr = Vec::with_capacity(elements.len());
                for element in elements {
                    arr.push(self.eval_expr(element, depth + 1)?);
                }
                Ok(Value::Array(arr))
            }
            Expr::Object { properties, .. } => {
                let mut entries = Vec::with_capacity(properties.len());
                for property in properties {
                    let key = self.eval_expr(&property.key, depth + 1)?;
                    let key = object_key(key, property.key.token())?;
                    let value = self.eval_expr(&property.value, depth + 1)?;
                    entries.push((key, value));
                }
                Ok(Value::Object(entries))
            }
        }
    }

    /// Evaluates a run of binary operators along its left spine without
    /// recursing into it, so a flat chain like `1 + 2 + ... + n` costs one
    /// level of depth however long it is.
    fn eval_chain(&self, expr: &Expr, depth: usize) -> Result<Value, EvalError> {
        let mut pending = Vec::new();
        let mut node = expr;
        while let Expr::Binary {
            op,
            left,
            right,
            token,
        } = node
        {
            pending.push((*op, right.as_ref(), token));
            node = left.as_ref();
        }

        let mut acc = self.eval_expr(node, depth + 1)?;
        for (op, right, token) in pending.into_iter().rev() {
            let right_val = self.eval_expr(right, depth + 1)?;
            acc = apply_binop(op, &acc, &right_val, token)?;
        }
        Ok(acc)
    }
}

/// Evaluates `expr` with default settings and returns compact JSON text.
///
/// # Examples
///
/// ```
/// use jsonpp::evaluator::compile;
/// use jsonpp::parser::parse;
///
/// let expr = parse(r#"{"a": 1, "b": [2 * 2, !true]}"#).unwrap();
/// assert_eq!(compile(&expr).unwrap(), r#"{"a":1,"b":[4,false]}"#);
/// ```
pub fn compile(expr: &Expr) -> Result<String, EvalError> {
    Evaluator::new().compile(expr)
}

fn object_key(key: Value, token: &Token) -> Result<String, EvalError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Integer(n) => Ok(n.to_string()),
        Value::Float(n) => Ok(format_number(n)),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        other => Err(EvalError::type_error(
            format!("Object key must be a string or scalar, got {}", other.type_name()),
            token,
        )),
    }
}

fn apply_unary(op: UnaryOp, value: Value, token: &Token) -> Result<Value, EvalError> {
    match op {
        UnaryOp::Identity => Ok(value),
        UnaryOp::Not => Ok(Value::Boolean(!value.is_truthy())),
        UnaryOp::Negate => match value {
            Value::Integer(n) => Ok(n
                .checked_neg()
                .map(Value::Integer)
                .unwrap_or(Value::Float(-(n as f64)))),
            Value::Float(n) => Ok(Value::Float(-n)),
            other => Err(EvalError::type_error(
                format!("Cannot negate {}", other.type_name()),
                token,
            )),
        },
    }
}

fn apply_binop(op: BinOp, left: &Value, right: &Value, token: &Token) -> Result<Value, EvalError> {
    if !left.is_number() || !right.is_number() {
        let (a, b) = (left.type_name(), right.type_name());
        let message = match op {
            BinOp::Add => format!("Cannot add {} and {}", a, b),
            BinOp::Subtract => format!("Cannot subtract {} from {}", b, a),
            BinOp::Multiply => format!("Cannot multiply {} by {}", a, b),
            BinOp::Divide => format!("Cannot divide {} by {}", a, b),
            BinOp::Power => format!("Cannot raise {} to the power of {}", a, b),
        };
        return Err(EvalError::type_error(message, token));
    }

    if op == BinOp::Divide && right.as_float() == Some(0.0) {
        return Err(EvalError::DivisionByZero {
            position: token.position,
        });
    }

    let result = match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => integer_op(op, *a, *b),
        (Value::Integer(a), Value::Float(b)) => narrow(float_op(op, *a as f64, *b)),
        (Value::Float(a), Value::Integer(b)) => narrow(float_op(op, *a, *b as f64)),
        (a, b) => {
            let (a, b) = (a.as_float().unwrap_or(f64::NAN), b.as_float().unwrap_or(f64::NAN));
            Value::Float(float_op(op, a, b))
        }
    };

    match result {
        Value::Float(n) if n.is_nan() && op == BinOp::Power => Err(EvalError::NotReal {
            position: token.position,
        }),
        Value::Float(n) if !n.is_finite() => Err(EvalError::NonFinite {
            operator: op.symbol(),
            position: token.position,
        }),
        value => Ok(value),
    }
}

/// Integer arithmetic, falling back to floating point when the exact result
/// does not fit in an `i64` or is not whole.
fn integer_op(op: BinOp, a: i64, b: i64) -> Value {
    let exact = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Subtract => a.checked_sub(b),
        BinOp::Multiply => a.checked_mul(b),
        BinOp::Divide => match a.checked_rem(b) {
            Some(0) => a.checked_div(b),
            _ => None,
        },
        BinOp::Power => u32::try_from(b).ok().and_then(|exp| a.checked_pow(exp)),
    };
    exact
        .map(Value::Integer)
        .unwrap_or_else(|| Value::Float(float_op(op, a as f64, b as f64)))
}

/// Result of mixed integer/float arithmetic: an integer when the float is
/// whole and inside the `i64` range, otherwise the float itself.
fn narrow(n: f64) -> Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Value::Integer(n as i64)
    } else {
        Value::Float(n)
    }
}

fn float_op(op: BinOp, a: f64, b: f64) -> f64 {
    match op {
        BinOp::Add => a + b,
        BinOp::Subtract => a - b,
        BinOp::Multiply => a * b,
        BinOp::Divide => a / b,
        BinOp::Power => a.powf(b),
    }
}
