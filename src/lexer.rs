use thiserror::Error;

use crate::ast::{Token, TokenKind};

/// Lexical failure. Malformed content is reported, never panicked, so a
/// broken script can be rejected without crashing the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("script is empty")]
    EmptyScript,

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedCharacter { found: char, offset: usize },
}

/// Single-pass scanner for formula scripts.
///
/// One instance scans one script. [`Lexer::scan`] is the whole-script
/// entry point; [`Lexer::next_token`] is the underlying streaming form.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            input: source.chars().collect(),
            position: 0,
        }
    }

    /// Scan a whole script into its ordered token sequence.
    pub fn scan(source: &str) -> Result<Vec<Token>, LexError> {
        if source.trim().is_empty() {
            return Err(LexError::EmptyScript);
        }

        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
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

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_number(&mut self) -> String {
        let mut number = String::new();
        let mut seen_point = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !seen_point
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                seen_point = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        number
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let offset = self.position;
        let kind = match self.current_char() {
            None => return Ok(None),
            Some('(') => {
                self.advance();
                TokenKind::LParen
            }
            Some(')') => {
                self.advance();
                TokenKind::RParen
            }
            Some('*') => {
                self.advance();
                TokenKind::Star
            }
            Some('#') => {
                self.advance();
                TokenKind::Hash
            }
            Some(ch) if ch.is_ascii_digit() => TokenKind::Number(self.read_number()),
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                TokenKind::Identifier(self.read_identifier())
            }
            Some(ch) => return Err(LexError::UnexpectedCharacter { found: ch, offset }),
        };

        Ok(Some(Token::new(kind, offset)))
    }
}

#[test]
fn test_example_formula() {
    let tokens = Lexer::scan("(add 35 (mul *strength 3))").unwrap();
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LParen,
            TokenKind::Identifier("add".to_string()),
            TokenKind::Number("35".to_string()),
            TokenKind::LParen,
            TokenKind::Identifier("mul".to_string()),
            TokenKind::Star,
            TokenKind::Identifier("strength".to_string()),
            TokenKind::Number("3".to_string()),
            TokenKind::RParen,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn test_blank_script() {
    assert_eq!(Lexer::scan("   \t\n"), Err(LexError::EmptyScript));
}
