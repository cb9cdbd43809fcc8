// Failures surfaced through the top-level compile entry point.
//
// Every error is fail-fast and reports the line and column of the token
// responsible for it.

use jsonpp::ast::{Expr, Literal, Position, Token, TokenKind, UnaryOp};
use jsonpp::{CompileError, EvalError, Evaluator, LexError, ParseError, compile};

fn eval_error(source: &str) -> EvalError {
    match compile(source) {
        Err(CompileError::Eval(e)) => e,
        other => panic!("Expected evaluation error for {}, got {:?}", source, other),
    }
}

// ============================================================================
// Type errors
// ============================================================================

#[test]
fn test_add_string_and_number() {
    let err = eval_error(r#""a" + 1"#);
    assert_eq!(
        err,
        EvalError::TypeError {
            message: "Cannot add string and integer".to_string(),
            position: Position::new(1, 5),
        }
    );
}

#[test]
fn test_string_concatenation_is_not_supported() {
    assert!(matches!(
        eval_error(r#""a" + "b""#),
        EvalError::TypeError { .. }
    ));
}

#[test]
fn test_negate_non_number() {
    let err = eval_error(r#"-"a""#);
    assert_eq!(
        err,
        EvalError::TypeError {
            message: "Cannot negate string".to_string(),
            position: Position::new(1, 1),
        }
    );
    assert!(matches!(eval_error("-true"), EvalError::TypeError { .. }));
    assert!(matches!(eval_error("-null"), EvalError::TypeError { .. }));
}

#[test]
fn test_arithmetic_on_containers() {
    let err = eval_error("[1] * 2");
    assert!(err.to_string().contains("Cannot multiply array by integer"), "{}", err);
    let err = eval_error("2 ^ {}");
    assert!(err.to_string().contains("Cannot raise integer to the power of object"), "{}", err);
    let err = eval_error("null - 1");
    assert!(err.to_string().contains("Cannot subtract integer from null"), "{}", err);
}

#[test]
fn test_non_scalar_object_key() {
    let err = eval_error(r#"{[1]: 2}"#);
    assert_eq!(err.position(), Position::new(1, 2));
    assert!(err.to_string().contains("Object key must be"), "{}", err);
}

#[test]
fn test_error_position_on_later_line() {
    let err = eval_error("{\n  \"a\": 1,\n  \"b\": true * 2\n}");
    assert_eq!(err.position(), Position::new(3, 13));
    assert!(err.to_string().contains("line 3 column 13"), "{}", err);
}

// ============================================================================
// Numeric errors
// ============================================================================

#[test]
fn test_division_by_zero() {
    assert_eq!(
        eval_error("1 / 0"),
        EvalError::DivisionByZero {
            position: Position::new(1, 3)
        }
    );
    assert!(matches!(eval_error("1.5 / 0.0"), EvalError::DivisionByZero { .. }));
    assert!(matches!(eval_error("1 / (2 - 2)"), EvalError::DivisionByZero { .. }));
}

#[test]
fn test_non_real_power() {
    assert_eq!(
        eval_error("(0 - 8) ^ 0.5"),
        EvalError::NotReal {
            position: Position::new(1, 9)
        }
    );
}

#[test]
fn test_overflow_to_infinity() {
    assert_eq!(
        eval_error("10 ^ 400"),
        EvalError::NonFinite {
            operator: "^",
            position: Position::new(1, 4),
        }
    );
    assert!(matches!(eval_error("0 ^ -1"), EvalError::NonFinite { .. }));
}

// ============================================================================
// Error kinds through the pipeline
// ============================================================================

#[test]
fn test_lex_error_is_reported_first() {
    match compile(r#"[1 / 0, "abc"#) {
        Err(CompileError::Lex(LexError::UnterminatedString { position })) => {
            assert_eq!(position, Position::new(1, 9));
        }
        other => panic!("Expected lex error, got {:?}", other),
    }
}

#[test]
fn test_parse_error_is_reported_before_evaluation() {
    assert!(matches!(
        compile("[1 / 0, 2"),
        Err(CompileError::Parse(ParseError::Expected { expected: "']'", .. }))
    ));
}

#[test]
fn test_first_evaluation_error_wins() {
    assert!(matches!(
        eval_error(r#"[1 / 0, "a" + 1]"#),
        EvalError::DivisionByZero { .. }
    ));
}

#[test]
fn test_compile_error_messages() {
    let err = compile("\"open").unwrap_err();
    assert!(err.to_string().starts_with("Lex error: Unterminated string"), "{}", err);

    let err = compile("1 +").unwrap_err();
    assert!(err.to_string().starts_with("Parse error: expected expression"), "{}", err);

    let err = compile("1 / 0").unwrap_err();
    assert_eq!(err.to_string(), "Evaluation error: Division by zero at line 1 column 3");
    assert_eq!(err.position(), Position::new(1, 3));
}

// ============================================================================
// Depth limit on hand-built trees
// ============================================================================

#[test]
fn test_evaluator_enforces_depth_limit() {
    let token = |kind, lexeme: &str| Token::new(kind, lexeme, Position::default());

    let mut expr = Expr::literal(Literal::Integer(1), token(TokenKind::Number, "1"));
    for _ in 0..10 {
        expr = Expr::unary(UnaryOp::Negate, expr, token(TokenKind::Minus, "-"));
    }

    assert!(Evaluator::new().with_max_depth(11).eval(&expr).is_ok());
    assert!(matches!(
        Evaluator::new().with_max_depth(10).eval(&expr),
        Err(EvalError::NestingTooDeep { max_depth: 10, .. })
    ));
}
