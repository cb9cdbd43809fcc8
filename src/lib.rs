//! # jsonpp
//!
//! JSON++ is JSON where any value may be written as an arithmetic expression.
//! A document is lexed, parsed into a syntax tree with a Pratt parser, and
//! reduced to canonical JSON text.
//!
//! ```
//! let json = jsonpp::compile(r#"{"area": 3 * 4, "ok": !false, "steps": [2 ^ 3 ^ 2, -5]}"#).unwrap();
//! assert_eq!(json, r#"{"area":12,"ok":true,"steps":[512,-5]}"#);
//! ```
//!
//! Processing is fail-fast: the first lexing, parsing or evaluation error
//! aborts the call and is returned as a [`CompileError`].

pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

use thiserror::Error;

pub use ast::{BinOp, Expr, Position, Token, TokenKind, UnaryOp};
pub use evaluator::{EvalError, Evaluator};
pub use lexer::{LexError, Lexer};
pub use output::{to_json, to_json_pretty};
pub use parser::{DEFAULT_MAX_DEPTH, ParseError, Parser};
pub use value::Value;

/// Any error produced by the compile pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl CompileError {
    /// Source position the error points at.
    pub fn position(&self) -> Position {
        match self {
            CompileError::Lex(e) => e.position(),
            CompileError::Parse(e) => e.position(),
            CompileError::Eval(e) => e.position(),
        }
    }
}

/// Options for a compile run
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Maximum nesting depth accepted by the parser and evaluator
    pub max_depth: usize,
    /// Pretty-print the output
    pub pretty: bool,
}

impl CompileOptions {
    fn evaluator(&self) -> Evaluator {
        Evaluator::new()
            .with_max_depth(self.max_depth)
            .with_pretty(self.pretty)
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: false,
        }
    }
}

/// Compiles a JSON++ document to compact canonical JSON.
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_with(source, &CompileOptions::default())
}

/// Compiles a JSON++ document with explicit options.
///
/// # Examples
///
/// ```
/// use jsonpp::{CompileOptions, compile_with};
///
/// let options = CompileOptions { pretty: true, ..Default::default() };
/// let json = compile_with("[1 + 1, 2 * 2]", &options).unwrap();
/// assert_eq!(json, "[\n  2,\n  4\n]");
/// ```
pub fn compile_with(source: &str, options: &CompileOptions) -> Result<String, CompileError> {
    let expr = parse_source(source, options)?;
    let json = options.evaluator().compile(&expr)?;
    log::debug!("compiled {} bytes of source into {} bytes of JSON", source.len(), json.len());
    Ok(json)
}

/// Runs the pipeline up to the typed value, without serializing it.
///
/// # Examples
///
/// ```
/// use jsonpp::{CompileOptions, Value, compile_value};
///
/// let value = compile_value("10 / 4", &CompileOptions::default()).unwrap();
/// assert_eq!(value, Value::Float(2.5));
/// ```
pub fn compile_value(source: &str, options: &CompileOptions) -> Result<Value, CompileError> {
    let expr = parse_source(source, options)?;
    Ok(options.evaluator().eval(&expr)?)
}

fn parse_source(source: &str, options: &CompileOptions) -> Result<Expr, CompileError> {
    let tokens = lexer::tokenize(source)?;
    log::debug!("lexed {} tokens", tokens.len());

    let expr = Parser::new(tokens)
        .with_max_depth(options.max_depth)
        .parse()?;
    log::debug!("parsed {} expression at {}", expr.kind_name(), expr.position());
    Ok(expr)
}
