use std::fmt;

/// A classified lexical unit with its position in the source script.
///
/// Tokens are immutable once produced and keep source order. `offset` is
/// the character index of the token's first character, used to localize
/// parse errors for content authors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Token { kind, offset }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

/// The kind of a token, with the lexeme payload where one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Opening parenthesis, beginning a production
    ///
    /// # Example
    /// ```text
    /// (add 1 2)
    /// ```
    LParen,

    /// Closing parenthesis, ending a production
    RParen,

    /// Numeric literal, kept as its raw lexeme
    ///
    /// Conversion to the engine's backing type happens at parse time, so
    /// the scanner serves every backing unchanged.
    ///
    /// # Examples
    /// ```text
    /// 35
    /// 1.5
    /// ```
    Number(String),

    /// Keyword, stat name, or boolean literal
    ///
    /// Which of the three an identifier is depends on position: after `(`
    /// it names a production, after `*` it names a stat, and bare `true`
    /// or `false` in a logic position is a boolean literal.
    ///
    /// # Examples
    /// ```text
    /// add
    /// strength
    /// true
    /// ```
    Identifier(String),

    /// Marks the next identifier as a stat reference
    ///
    /// # Example
    /// ```text
    /// (mul *strength 3)
    /// ```
    Star,

    /// Reserved marker character
    ///
    /// Accepted by the scanner, rejected by the parser. No grammar rule
    /// gives it a meaning.
    Hash,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Number(lexeme) => write!(f, "number {}", lexeme),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Hash => write!(f, "'#'"),
        }
    }
}
