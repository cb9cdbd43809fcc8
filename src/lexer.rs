use thiserror::Error;

use crate::ast::{Position, Token, TokenKind};

/// Errors raised while scanning source text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// End of input reached before the closing quote
    #[error("Unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    /// Backslash followed by a character that is not a JSON escape
    #[error("Invalid escape character '\\{found}' at {position}")]
    InvalidEscape { found: char, position: Position },

    /// `\u` not followed by exactly four hex digits
    #[error("Invalid Unicode escape '\\u{digits}' at {position}")]
    InvalidUnicodeEscape { digits: String, position: Position },

    /// Character that cannot start any token
    #[error("Unexpected character '{found}' at {position}")]
    UnexpectedCharacter { found: char, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position, .. }
            | LexError::InvalidUnicodeEscape { position, .. }
            | LexError::UnexpectedCharacter { position, .. } => *position,
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn location(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn matches_keyword(&self, keyword: &str) -> bool {
        keyword
            .chars()
            .enumerate()
            .all(|(offset, expected)| self.peek_char(offset) == Some(expected))
    }

    fn single(&mut self, kind: TokenKind, ch: char) -> Token {
        let token = Token::new(kind, ch, self.location());
        self.advance();
        token
    }

    fn keyword(&mut self, kind: TokenKind, keyword: &str) -> Token {
        let token = Token::new(kind, keyword, self.location());
        for _ in keyword.chars() {
            self.advance();
        }
        token
    }

    /// Reads a string literal, validating escapes but keeping the raw text.
    fn read_string(&mut self) -> Result<Token, LexError> {
        let start = self.location();
        let mut raw = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(Token::new(TokenKind::String, raw, start));
                }
                '\\' => {
                    let escape_at = self.location();
                    raw.push(ch);
                    self.advance();
                    self.read_escape(escape_at, &mut raw)?;
                }
                _ => {
                    raw.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_escape(&mut self, escape_at: Position, raw: &mut String) -> Result<(), LexError> {
        match self.current_char() {
            Some(ch @ ('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't')) => {
                raw.push(ch);
                self.advance();
                Ok(())
            }
            Some('u') => {
                raw.push('u');
                self.advance();

                let mut digits = String::new();
                for _ in 0..4 {
                    match self.current_char() {
                        Some(ch) if ch.is_ascii_hexdigit() => {
                            digits.push(ch);
                            self.advance();
                        }
                        Some('"') | None => {
                            return Err(LexError::InvalidUnicodeEscape {
                                digits,
                                position: escape_at,
                            });
                        }
                        Some(ch) => {
                            digits.push(ch);
                            return Err(LexError::InvalidUnicodeEscape {
                                digits,
                                position: escape_at,
                            });
                        }
                    }
                }
                raw.push_str(&digits);
                Ok(())
            }
            Some(found) => Err(LexError::InvalidEscape {
                found,
                position: escape_at,
            }),
            None => Err(LexError::UnterminatedString {
                position: escape_at,
            }),
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.location();
        let mut number = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, number, start)
    }

    /// Scans the next token. Once the input is exhausted every call returns
    /// an `Eof` token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let token = match self.current_char() {
            None => Token::eof(self.location()),
            Some(ch @ '(') => self.single(TokenKind::LeftParen, ch),
            Some(ch @ ')') => self.single(TokenKind::RightParen, ch),
            Some(ch @ '[') => self.single(TokenKind::LeftBracket, ch),
            Some(ch @ ']') => self.single(TokenKind::RightBracket, ch),
            Some(ch @ '{') => self.single(TokenKind::LeftBrace, ch),
            Some(ch @ '}') => self.single(TokenKind::RightBrace, ch),
            Some(ch @ ':') => self.single(TokenKind::Colon, ch),
            Some(ch @ ',') => self.single(TokenKind::Comma, ch),
            Some(ch @ '+') => self.single(TokenKind::Plus, ch),
            Some(ch @ '-') => self.single(TokenKind::Minus, ch),
            Some(ch @ '*') => self.single(TokenKind::Star, ch),
            Some(ch @ '/') => self.single(TokenKind::Slash, ch),
            Some(ch @ '^') => self.single(TokenKind::Caret, ch),
            Some(ch @ '!') => self.single(TokenKind::Bang, ch),
            Some('"') => self.read_string()?,
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(_) if self.matches_keyword("true") => self.keyword(TokenKind::True, "true"),
            Some(_) if self.matches_keyword("false") => self.keyword(TokenKind::False, "false"),
            Some(_) if self.matches_keyword("null") => self.keyword(TokenKind::Null, "null"),
            Some(found) => {
                return Err(LexError::UnexpectedCharacter {
                    found,
                    position: self.location(),
                });
            }
        };

        Ok(token)
    }

    /// Scans the whole input. The returned vector always ends with a single
    /// `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        log::trace!("scanned {} tokens over {} lines", tokens.len(), self.line);
        Ok(tokens)
    }
}

/// Convenience wrapper around [`Lexer::tokenize`].
///
/// # Examples
///
/// ```
/// use jsonpp::ast::TokenKind;
/// use jsonpp::lexer::tokenize;
///
/// let tokens = tokenize("-5").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![TokenKind::Minus, TokenKind::Number, TokenKind::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Decodes the escape sequences of a raw string lexeme.
///
/// The input is expected to have been validated by the lexer. UTF-16
/// surrogate pairs written as two `\u` escapes are joined; an unpaired
/// surrogate becomes U+FFFD.
pub fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&'u') {
            chars.next();
            let digits: String = chars.by_ref().take(4).collect();
            units.push(u16::from_str_radix(&digits, 16).unwrap_or(0xFFFD));
            continue;
        }

        flush_units(&mut units, &mut result);

        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000C}'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    flush_units(&mut units, &mut result);
    result
}

fn flush_units(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("true false null");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::True);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::False);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Null);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_keyword_prefix_leaves_remainder() {
    let mut lexer = Lexer::new("truex");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::True);
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnexpectedCharacter {
            found: 'x',
            position: Position::new(1, 5),
        })
    );
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new(" ");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_unescape() {
    assert_eq!(unescape(r#"a\"b"#), "a\"b");
    assert_eq!(unescape(r"tab\there"), "tab\there");
    assert_eq!(unescape(r"\/\\"), "/\\");
    assert_eq!(unescape(r"caf\u00e9"), "café");
    assert_eq!(unescape(r"\ud83d\ude00"), "😀");
    assert_eq!(unescape(r"\ud83dx"), "\u{FFFD}x");
}
