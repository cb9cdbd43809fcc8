use crate::ast::{BinOp, Position, Token, UnaryOp};

/// Scalar carried by a literal node.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// String literal with its escape sequences decoded
    ///
    /// # Example
    /// ```text
    /// "café"   // String("café")
    /// ```
    String(String),

    /// Number literal without a fractional part that fits in an `i64`
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Integer(i64),

    /// Any other number literal
    ///
    /// # Example
    /// ```text
    /// 3.14
    /// ```
    Float(f64),

    /// Boolean literal
    Boolean(bool),

    /// Null literal
    Null,
}

/// Abstract Syntax Tree node.
///
/// Every variant keeps the token(s) it was built from so that the evaluator
/// can point at the source when it rejects a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Scalar literal
    Literal { value: Literal, token: Token },

    /// Prefix operation
    ///
    /// # Examples
    /// ```text
    /// -5
    /// !true
    /// ```
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        token: Token,
    },

    /// Infix operation
    ///
    /// # Examples
    /// ```text
    /// 2 + 3 * 4
    /// 2 ^ 3 ^ 2
    /// ```
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        token: Token,
    },

    /// Array literal
    ///
    /// # Example
    /// ```text
    /// [1, 2 * 3, "x"]
    /// ```
    Array {
        elements: Vec<Expr>,
        open: Token,
        close: Token,
    },

    /// Object literal; keys are expressions like any other
    ///
    /// # Example
    /// ```text
    /// {"total": 10 * 3, 1 + 1: "two"}
    /// ```
    Object {
        properties: Vec<Property>,
        open: Token,
        close: Token,
    },
}

/// One `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: Expr,
    pub value: Expr,
}

impl Property {
    pub fn new(key: Expr, value: Expr) -> Self {
        Property { key, value }
    }
}

impl Expr {
    pub fn literal(value: Literal, token: Token) -> Self {
        Expr::Literal { value, token }
    }

    pub fn unary(op: UnaryOp, operand: Expr, token: Token) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
            token,
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr, token: Token) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            token,
        }
    }

    pub fn array(elements: Vec<Expr>, open: Token, close: Token) -> Self {
        Expr::Array {
            elements,
            open,
            close,
        }
    }

    pub fn object(properties: Vec<Property>, open: Token, close: Token) -> Self {
        Expr::Object {
            properties,
            open,
            close,
        }
    }

    /// The token a diagnostic about this node should point at.
    ///
    /// Operators report their operator token, containers their opening
    /// delimiter.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Literal { token, .. } | Expr::Unary { token, .. } | Expr::Binary { token, .. } => {
                token
            }
            Expr::Array { open, .. } | Expr::Object { open, .. } => open,
        }
    }

    pub fn position(&self) -> Position {
        self.token().position
    }

    /// Short node name, used in debug logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Literal { .. } => "literal",
            Expr::Unary { .. } => "unary",
            Expr::Binary { .. } => "binary",
            Expr::Array { .. } => "array",
            Expr::Object { .. } => "object",
        }
    }
}
