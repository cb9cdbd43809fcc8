//! Operator-precedence (Pratt) parser.
//!
//! Every token kind has up to two parse rules: a *prefix* rule used when the
//! token starts an expression, and an *infix* rule used when it continues one
//! as an operator. Whether an infix operator binds into the expression on its
//! left is decided by comparing its binding power with the minimum binding
//! power of the expression currently being parsed.
//!
//! The rule and binding-power tables are plain `match` functions, so they are
//! immutable and shared by every parser instance.

use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, Literal, Position, Property, Token, TokenKind, UnaryOp},
    lexer::unescape,
};

/// Default limit for [`Parser::with_max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Binding power of the prefix operators `+`, `-` and `!`.
const UNARY_BP: u8 = 80;
const POWER_BP: u8 = 70;
const PRODUCT_BP: u8 = 60;
const SUM_BP: u8 = 50;

/// Errors that can occur while building the syntax tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token that cannot start an expression where one was required
    #[error("expected expression at {position}, got {found}")]
    ExpectedExpression { found: String, position: Position },

    /// A specific token (closing delimiter, separator, end of input) was
    /// required
    #[error("Expected {expected} at {position}, got {found}")]
    Expected {
        expected: &'static str,
        found: String,
        position: Position,
    },

    /// A token with a binding power but no infix rule. Only reachable if the
    /// rule tables disagree.
    #[error("Expected operator at {position}, got {found}")]
    MissingInfixRule { found: String, position: Position },

    /// Number token whose lexeme is not a decimal number
    #[error("Invalid number literal {found} at {position}")]
    InvalidNumber { found: String, position: Position },

    #[error("Nesting too deep at {position}: maximum depth is {max_depth}")]
    NestingTooDeep { max_depth: usize, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::ExpectedExpression { position, .. }
            | ParseError::Expected { position, .. }
            | ParseError::MissingInfixRule { position, .. }
            | ParseError::InvalidNumber { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }

    fn expected(expected: &'static str, token: &Token) -> Self {
        ParseError::Expected {
            expected,
            found: token.describe(),
            position: token.position,
        }
    }
}

type PrefixRule = fn(&mut Parser, Token) -> Result<Expr, ParseError>;
type InfixRule = fn(&mut Parser, Expr, Token) -> Result<Expr, ParseError>;

/// Binding power of a token in infix position. Tokens that never continue an
/// expression have power 0 and so always end it.
fn binding_power(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Caret => POWER_BP,
        TokenKind::Star | TokenKind::Slash => PRODUCT_BP,
        TokenKind::Plus | TokenKind::Minus => SUM_BP,
        _ => 0,
    }
}

fn prefix_rule(kind: TokenKind) -> Option<PrefixRule> {
    match kind {
        TokenKind::Number
        | TokenKind::String
        | TokenKind::True
        | TokenKind::False
        | TokenKind::Null => Some(literal),
        TokenKind::Bang | TokenKind::Plus | TokenKind::Minus => Some(unary),
        TokenKind::LeftParen => Some(group),
        TokenKind::LeftBracket => Some(array),
        TokenKind::LeftBrace => Some(object),
        _ => None,
    }
}

fn infix_rule(kind: TokenKind) -> Option<InfixRule> {
    match kind {
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Caret => Some(binary),
        _ => None,
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    /// Creates a parser over a token stream. A missing trailing `Eof` token
    /// is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let position = tokens.last().map(|t| t.position).unwrap_or_default();
            tokens.push(Token::eof(position));
        }
        Parser {
            tokens,
            position: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    /// Consumes the current token. The cursor never moves past `Eof`.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn descend(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                max_depth: self.max_depth,
                position: token.position,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Parses one expression whose infix operators all bind tighter than
    /// `min_bp`.
    ///
    /// Each call is one level of nesting. Operators folded into the result
    /// do not add depth, so a flat chain such as `1 + 2 + ... + n` is as deep
    /// as its first operand. The depth is restored on every return,
    /// including errors.
    pub fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let token = self.advance();
        self.descend(&token)?;
        let result = self.parse_operators(token, min_bp);
        self.depth -= 1;
        result
    }

    fn parse_operators(&mut self, token: Token, min_bp: u8) -> Result<Expr, ParseError> {
        let rule = prefix_rule(token.kind).ok_or_else(|| ParseError::ExpectedExpression {
            found: token.describe(),
            position: token.position,
        })?;
        let mut left = rule(self, token)?;

        while binding_power(self.peek().kind) > min_bp {
            let rule = infix_rule(self.peek().kind).ok_or_else(|| ParseError::MissingInfixRule {
                found: self.peek().describe(),
                position: self.peek().position,
            })?;
            let token = self.advance();
            left = rule(self, left, token)?;
        }

        Ok(left)
    }

    /// Parses the whole token stream as a single expression followed by end
    /// of input.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        self.position = 0;
        self.depth = 0;

        let expr = self.parse_expression(0)?;

        if !self.check(TokenKind::Eof) {
            return Err(ParseError::expected("end of input", self.peek()));
        }
        log::trace!(
            "parsed {} root spanning {} tokens",
            expr.kind_name(),
            self.tokens.len()
        );
        Ok(expr)
    }

    /// After a container element: stop at the closing delimiter, consume a
    /// comma, or fail. Returns `false` when the element list is finished.
    fn element_separator(&mut self, close: TokenKind) -> Result<bool, ParseError> {
        let next = self.peek();
        if next.kind == close || next.kind == TokenKind::Eof {
            // A missing closer is reported by the caller
            return Ok(false);
        }
        if next.kind != TokenKind::Comma {
            return Err(ParseError::expected("','", next));
        }
        self.advance();
        Ok(true)
    }
}

// Prefix rules

fn literal(_parser: &mut Parser, token: Token) -> Result<Expr, ParseError> {
    let value = match token.kind {
        TokenKind::Number => parse_number(&token)?,
        TokenKind::String => Literal::String(unescape(&token.lexeme)),
        TokenKind::True => Literal::Boolean(true),
        TokenKind::False => Literal::Boolean(false),
        _ => Literal::Null,
    };
    Ok(Expr::literal(value, token))
}

fn parse_number(token: &Token) -> Result<Literal, ParseError> {
    let lexeme = &token.lexeme;
    if !lexeme.contains('.')
        && let Ok(n) = lexeme.parse::<i64>()
    {
        return Ok(Literal::Integer(n));
    }
    if !lexeme.is_empty()
        && lexeme.chars().all(|c| c.is_ascii_digit() || c == '.')
        && let Ok(n) = lexeme.parse::<f64>()
    {
        return Ok(Literal::Float(n));
    }
    Err(ParseError::InvalidNumber {
        found: token.describe(),
        position: token.position,
    })
}

fn unary(parser: &mut Parser, token: Token) -> Result<Expr, ParseError> {
    let op = match token.kind {
        TokenKind::Bang => UnaryOp::Not,
        TokenKind::Minus => UnaryOp::Negate,
        _ => UnaryOp::Identity,
    };
    let operand = parser.parse_expression(UNARY_BP)?;
    Ok(Expr::unary(op, operand, token))
}

fn group(parser: &mut Parser, _token: Token) -> Result<Expr, ParseError> {
    let expr = parser.parse_expression(0)?;
    let close = parser.advance();
    if close.kind != TokenKind::RightParen {
        return Err(ParseError::expected(")", &close));
    }
    Ok(expr)
}

fn array(parser: &mut Parser, open: Token) -> Result<Expr, ParseError> {
    let mut elements = vec![];

    while !parser.check(TokenKind::RightBracket) && !parser.check(TokenKind::Eof) {
        elements.push(parser.parse_expression(0)?);

        if !parser.element_separator(TokenKind::RightBracket)? {
            break;
        }
    }

    let close = parser.advance();
    if close.kind != TokenKind::RightBracket {
        return Err(ParseError::expected("']'", &close));
    }
    Ok(Expr::array(elements, open, close))
}

fn object(parser: &mut Parser, open: Token) -> Result<Expr, ParseError> {
    let mut properties = vec![];

    while !parser.check(TokenKind::RightBrace) && !parser.check(TokenKind::Eof) {
        let key = parser.parse_expression(0)?;

        let colon = parser.advance();
        if colon.kind != TokenKind::Colon {
            return Err(ParseError::expected("':'", &colon));
        }

        let value = parser.parse_expression(0)?;
        properties.push(Property::new(key, value));

        if !parser.element_separator(TokenKind::RightBrace)? {
            break;
        }
    }

    let close = parser.advance();
    if close.kind != TokenKind::RightBrace {
        return Err(ParseError::expected("'}'", &close));
    }
    Ok(Expr::object(properties, open, close))
}

// Infix rules

fn binary(parser: &mut Parser, left: Expr, token: Token) -> Result<Expr, ParseError> {
    let op = match token.kind {
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Subtract,
        TokenKind::Star => BinOp::Multiply,
        TokenKind::Slash => BinOp::Divide,
        TokenKind::Caret => BinOp::Power,
        _ => {
            return Err(ParseError::MissingInfixRule {
                found: token.describe(),
                position: token.position,
            });
        }
    };

    let bp = binding_power(token.kind);
    // `^` is right-associative: its right operand may itself contain `^`
    let right_bp = if op == BinOp::Power { bp - 1 } else { bp };

    let right = parser.parse_expression(right_bp)?;
    Ok(Expr::binary(op, left, right, token))
}

/// Lexes and parses `source` with the default depth limit.
///
/// # Examples
///
/// ```
/// use jsonpp::ast::{BinOp, Expr};
/// use jsonpp::parser::parse;
///
/// let expr = parse("2 ^ 3 ^ 2").unwrap();
/// match expr {
///     Expr::Binary { op: BinOp::Power, right, .. } => {
///         assert!(matches!(*right, Expr::Binary { op: BinOp::Power, .. }));
///     }
///     other => panic!("unexpected tree: {:?}", other),
/// }
/// ```
pub fn parse(source: &str) -> Result<Expr, crate::CompileError> {
    let tokens = crate::lexer::tokenize(source)?;
    Ok(Parser::new(tokens).parse()?)
}
