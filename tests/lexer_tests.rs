// tests/lexer_tests.rs

use jsonpp::ast::{Position, TokenKind};
use jsonpp::lexer::{LexError, Lexer, tokenize};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap().iter().map(|t| t.kind).collect()
}

fn lexemes(source: &str) -> Vec<String> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.lexeme)
        .collect()
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("(", TokenKind::LeftParen),
        (")", TokenKind::RightParen),
        ("[", TokenKind::LeftBracket),
        ("]", TokenKind::RightBracket),
        ("{", TokenKind::LeftBrace),
        ("}", TokenKind::RightBrace),
        (":", TokenKind::Colon),
        (",", TokenKind::Comma),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("*", TokenKind::Star),
        ("/", TokenKind::Slash),
        ("^", TokenKind::Caret),
        ("!", TokenKind::Bang),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.lexeme, input);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }
}

#[test]
fn test_punctuation_run() {
    assert_eq!(
        kinds("{}[]:,+-*/!"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Bang,
            TokenKind::Eof,
        ]
    );
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers_never_carry_a_sign() {
    assert_eq!(
        lexemes("42 -5 3.14 -0.001 123.456"),
        vec!["42", "-", "5", "3.14", "-", "0.001", "123.456"]
    );
}

#[test]
fn test_numbers_with_operators() {
    assert_eq!(
        kinds("-5 * 1 / +3"),
        vec![
            TokenKind::Minus,
            TokenKind::Number,
            TokenKind::Star,
            TokenKind::Number,
            TokenKind::Slash,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    let mut lexer = Lexer::new("1.");
    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Number);
    assert_eq!(token.lexeme, "1");
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnexpectedCharacter {
            found: '.',
            position: Position::new(1, 2),
        })
    );
}

#[test]
fn test_second_dot_ends_number() {
    let mut lexer = Lexer::new("1.2.3");
    assert_eq!(lexer.next_token().unwrap().lexeme, "1.2");
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::UnexpectedCharacter { found: '.', .. })
    ));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_simple_strings() {
    assert_eq!(lexemes(r#""hello" "world""#), vec!["hello", "world"]);
}

#[test]
fn test_empty_string() {
    let tokens = tokenize(r#""""#).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "");
}

#[test]
fn test_string_lexeme_keeps_escapes_raw() {
    assert_eq!(
        lexemes(r#""a\nb" "q\"q" "é" "\/\\\b\f\r\t""#),
        vec![r"a\nb", r#"q\"q"#, r"é", r"\/\\\b\f\r\t"]
    );
}

#[test]
fn test_raw_newline_inside_string() {
    let tokens = tokenize("\"line1\nline2\" 1").unwrap();
    assert_eq!(tokens[0].lexeme, "line1\nline2");
    assert_eq!(tokens[1].position, Position::new(2, 8));
}

#[test]
fn test_unterminated_string() {
    let err = tokenize("\"unterminated").unwrap_err();
    assert_eq!(
        err,
        LexError::UnterminatedString {
            position: Position::new(1, 1)
        }
    );
    assert!(err.to_string().contains("Unterminated string"));
}

#[test]
fn test_backslash_at_end_of_input() {
    let err = tokenize("\"abc\\").unwrap_err();
    assert_eq!(
        err,
        LexError::UnterminatedString {
            position: Position::new(1, 5)
        }
    );
}

#[test]
fn test_invalid_escape() {
    let err = tokenize(r#""\x""#).unwrap_err();
    assert_eq!(
        err,
        LexError::InvalidEscape {
            found: 'x',
            position: Position::new(1, 2),
        }
    );
    assert!(err.to_string().contains("Invalid escape character"));
}

#[test]
fn test_invalid_unicode_escape() {
    let err = tokenize(r#""\u12G4""#).unwrap_err();
    assert_eq!(
        err,
        LexError::InvalidUnicodeEscape {
            digits: "12G".to_string(),
            position: Position::new(1, 2),
        }
    );
    assert!(err.to_string().contains("Invalid Unicode escape"));
}

#[test]
fn test_short_unicode_escape() {
    assert!(matches!(
        tokenize(r#""\u12""#),
        Err(LexError::InvalidUnicodeEscape { digits, .. }) if digits == "12"
    ));
    assert!(matches!(
        tokenize(r#""\u1"#),
        Err(LexError::InvalidUnicodeEscape { .. })
    ));
}

// ============================================================================
// Keywords and unexpected input
// ============================================================================

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("true false null"),
        vec![
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_partial_keyword_is_unexpected() {
    assert_eq!(
        tokenize("nul"),
        Err(LexError::UnexpectedCharacter {
            found: 'n',
            position: Position::new(1, 1),
        })
    );
}

#[test]
fn test_unexpected_character() {
    let err = tokenize("1 # 2").unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedCharacter {
            found: '#',
            position: Position::new(1, 3),
        }
    );
    assert!(err.to_string().contains("Unexpected character"));
}

#[test]
fn test_percent_is_not_an_operator() {
    assert!(matches!(
        tokenize("5 % 2"),
        Err(LexError::UnexpectedCharacter { found: '%', .. })
    ));
}

// ============================================================================
// Positions and end of input
// ============================================================================

#[test]
fn test_positions_across_lines() {
    let tokens = tokenize("{\n  \"a\": 1\n}").unwrap();
    let positions: Vec<(TokenKind, Position)> =
        tokens.iter().map(|t| (t.kind, t.position)).collect();
    assert_eq!(
        positions,
        vec![
            (TokenKind::LeftBrace, Position::new(1, 1)),
            (TokenKind::String, Position::new(2, 3)),
            (TokenKind::Colon, Position::new(2, 6)),
            (TokenKind::Number, Position::new(2, 8)),
            (TokenKind::RightBrace, Position::new(3, 1)),
            (TokenKind::Eof, Position::new(3, 2)),
        ]
    );
}

#[test]
fn test_single_trailing_eof() {
    let tokens = tokenize("  42  ").unwrap();
    assert_eq!(tokens.len(), 2);
    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.lexeme, "");
    assert_eq!(eof.position, Position::new(1, 7));
}

#[test]
fn test_empty_input() {
    let tokens = tokenize("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].position, Position::new(1, 1));
}

#[test]
fn test_mixed_json_snippet() {
    let json = r#"
    {
      "num": -42,
      "arr": [1, 2, 3],
      "obj": {"a": true, "b": null},
      "str": "Hello World"
    }
    "#;
    assert_eq!(
        lexemes(json),
        vec![
            "{", "num", ":", "-", "42", ",", "arr", ":", "[", "1", ",", "2", ",", "3", "]", ",",
            "obj", ":", "{", "a", ":", "true", ",", "b", ":", "null", "}", ",", "str", ":",
            "Hello World", "}",
        ]
    );
}
