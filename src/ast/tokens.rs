use std::fmt;

/// A 1-based source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[` opening an array literal
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{` opening an object literal
    LeftBrace,
    /// `}`
    RightBrace,
    /// Separator between array elements and object properties
    Comma,
    /// Separator between an object key and its value
    Colon,

    // Operators
    /// Addition or unary identity
    ///
    /// # Examples
    /// ```text
    /// 1 + 2
    /// +5
    /// ```
    Plus,

    /// Subtraction or unary negation
    ///
    /// Number literals never carry a sign, so `-5` is `Minus` followed by
    /// `Number("5")`.
    Minus,

    /// Multiplication
    Star,

    /// Division
    Slash,

    /// Exponentiation (right-associative)
    ///
    /// # Examples
    /// ```text
    /// 2 ^ 3 ^ 2   // 2 ^ 9
    /// ```
    Caret,

    /// Logical not
    Bang,

    // Literals
    /// String literal enclosed in double quotes
    ///
    /// The lexeme is the raw text between the quotes, escapes untouched.
    String,

    /// Decimal number without sign or exponent
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// ```
    Number,

    /// `true`
    True,

    /// `false`
    False,

    /// `null`
    Null,

    /// End of input, always the last token with an empty lexeme
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Caret => "'^'",
            TokenKind::Bang => "'!'",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A lexical token together with the raw text it was scanned from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Token::new(TokenKind::Eof, "", position)
    }

    /// Text used when a diagnostic names this token.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::String => format!("\"{}\"", self.lexeme),
            _ => format!("'{}'", self.lexeme),
        }
    }
}
