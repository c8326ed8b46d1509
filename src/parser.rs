use thiserror::Error;
use tracing::debug;

use crate::ast::{Expr, ExprError, LogicExpr, Token, TokenKind, ValueExpr};
use crate::registry::{ExpressionRegistry, StatRegistry};
use crate::value::Numeric;

/// Hard ceiling on production nesting. Descending past it is a reported
/// parse failure instead of a host stack overflow on adversarial scripts.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Grammar-level failure. Bad content is expected and must never crash
/// the host; every variant carries enough position data to point an
/// author at the problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown production keyword '{keyword}' at offset {offset}")]
    UnknownKeyword { keyword: String, offset: usize },

    #[error("expected a production keyword after '(' at offset {offset}")]
    ExpectedKeyword { offset: usize },

    #[error("unmatched '(' opened at offset {offset}")]
    UnmatchedParen { offset: usize },

    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected end of script")]
    UnexpectedEnd,

    #[error("bare identifier '{identifier}' at offset {offset} (stat references are written '*{identifier}')")]
    BareIdentifier { identifier: String, offset: usize },

    #[error("unresolved stat identifier '{identifier}' at offset {offset}")]
    UnresolvedStat { identifier: String, offset: usize },

    #[error("'*' at offset {offset} is not followed by a stat identifier")]
    MissingStatName { offset: usize },

    #[error("numeric literal '{literal}' at offset {offset} is not representable")]
    InvalidNumber { literal: String, offset: usize },

    #[error("'#' at offset {offset} is reserved and has no meaning")]
    ReservedMarker { offset: usize },

    #[error("leftover tokens after the formula, starting at offset {offset}")]
    TrailingTokens { offset: usize },

    #[error("formula nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("expected a value operand at offset {offset}")]
    ExpectedValue { offset: usize },

    #[error("expected a logic operand at offset {offset}")]
    ExpectedLogic { offset: usize },

    #[error("production requires at least {expected} operands, found {found} (offset {offset})")]
    NotEnoughOperands {
        expected: usize,
        found: usize,
        offset: usize,
    },

    #[error("production operands do not match the declared shape")]
    OperandMismatch,

    #[error(transparent)]
    Node(#[from] ExprError),
}

/// An operand collected by a production's reader: a member of either
/// node family.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<N> {
    Value(ValueExpr<N>),
    Logic(LogicExpr<N>),
}

impl<N> Operand<N> {
    pub fn into_value(self) -> Result<ValueExpr<N>, ParseError> {
        match self {
            Operand::Value(value) => Ok(value),
            Operand::Logic(_) => Err(ParseError::OperandMismatch),
        }
    }

    pub fn into_logic(self) -> Result<LogicExpr<N>, ParseError> {
        match self {
            Operand::Logic(logic) => Ok(logic),
            Operand::Value(_) => Err(ParseError::OperandMismatch),
        }
    }
}

/// Recursive-descent parser over one token sequence.
///
/// Descent is keyed on parenthesis nesting: every `(` selects a
/// production by keyword through the expression registry, and the
/// production's reader drives further consumption through the cursor
/// surface ([`value_operand`](Parser::value_operand),
/// [`logic_operand`](Parser::logic_operand),
/// [`at_close`](Parser::at_close)). One parser builds one tree;
/// [`parse`](Parser::parse) consumes it.
pub struct Parser<'a, N> {
    tokens: &'a [Token],
    position: usize,
    expressions: &'a ExpressionRegistry<N>,
    stats: &'a StatRegistry,
    depth: usize,
}

impl<'a, N: Numeric> Parser<'a, N> {
    pub fn new(
        tokens: &'a [Token],
        expressions: &'a ExpressionRegistry<N>,
        stats: &'a StatRegistry,
    ) -> Self {
        Parser {
            tokens,
            position: 0,
            expressions,
            stats,
            depth: 0,
        }
    }

    /// Build the single root expression spanning the whole token stream.
    pub fn parse(mut self) -> Result<Expr<N>, ParseError> {
        let result = self.root();
        if let Err(error) = &result {
            debug!(%error, "parse failed");
        }
        result
    }

    fn root(&mut self) -> Result<Expr<N>, ParseError> {
        let root = self.expression()?;
        if let Some(token) = self.peek() {
            return Err(ParseError::TrailingTokens {
                offset: token.offset,
            });
        }
        Ok(root)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// True when the next token closes the current production.
    pub fn at_close(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token {
                kind: TokenKind::RParen,
                ..
            })
        )
    }

    /// True when the token stream is exhausted.
    pub fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Offset of the next token, or of the end of the script.
    pub fn offset(&self) -> usize {
        match self.peek() {
            Some(token) => token.offset,
            None => self.tokens.last().map(|t| t.offset + 1).unwrap_or(0),
        }
    }

    /// Parse the next operand and require it to be value-producing.
    pub fn value_operand(&mut self) -> Result<ValueExpr<N>, ParseError> {
        let offset = self.offset();
        match self.expression()? {
            Expr::Value(value) => Ok(value),
            Expr::Logic(_) => Err(ParseError::ExpectedValue { offset }),
        }
    }

    /// Parse the next operand and require it to be boolean-producing.
    pub fn logic_operand(&mut self) -> Result<LogicExpr<N>, ParseError> {
        let offset = self.offset();
        match self.expression()? {
            Expr::Value(_) => Err(ParseError::ExpectedLogic { offset }),
            Expr::Logic(logic) => Ok(logic),
        }
    }

    fn expression(&mut self) -> Result<Expr<N>, ParseError> {
        let token = self.peek().ok_or(ParseError::UnexpectedEnd)?.clone();
        match token.kind {
            TokenKind::LParen => self.production(),
            TokenKind::Number(lexeme) => {
                self.advance();
                let value =
                    N::parse_literal(&lexeme).ok_or_else(|| ParseError::InvalidNumber {
                        literal: lexeme.clone(),
                        offset: token.offset,
                    })?;
                Ok(Expr::Value(ValueExpr::Literal(value)))
            }
            TokenKind::Star => {
                self.advance();
                self.stat_reference(token.offset).map(Expr::Value)
            }
            TokenKind::Identifier(name) => match name.as_str() {
                "true" => {
                    self.advance();
                    Ok(Expr::Logic(LogicExpr::Literal(true)))
                }
                "false" => {
                    self.advance();
                    Ok(Expr::Logic(LogicExpr::Literal(false)))
                }
                _ => Err(ParseError::BareIdentifier {
                    identifier: name,
                    offset: token.offset,
                }),
            },
            TokenKind::Hash => Err(ParseError::ReservedMarker {
                offset: token.offset,
            }),
            TokenKind::RParen => Err(ParseError::UnexpectedToken {
                found: "')'".to_string(),
                offset: token.offset,
            }),
        }
    }

    fn stat_reference(&mut self, star_offset: usize) -> Result<ValueExpr<N>, ParseError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                offset,
            }) => self
                .stats
                .resolve(&name)
                .map(ValueExpr::Stat)
                .ok_or(ParseError::UnresolvedStat {
                    identifier: name,
                    offset,
                }),
            _ => Err(ParseError::MissingStatName {
                offset: star_offset,
            }),
        }
    }

    fn production(&mut self) -> Result<Expr<N>, ParseError> {
        let open = self.advance().ok_or(ParseError::UnexpectedEnd)?;
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }

        let (keyword, keyword_offset) = match self.advance() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                offset,
            }) => (name, offset),
            Some(token) => {
                return Err(ParseError::ExpectedKeyword {
                    offset: token.offset,
                });
            }
            None => return Err(ParseError::UnexpectedEnd),
        };

        let production =
            self.expressions
                .production(&keyword)
                .ok_or(ParseError::UnknownKeyword {
                    keyword,
                    offset: keyword_offset,
                })?;

        let operands = production.read_operands(self)?;
        let node = production.build_node(operands)?;

        match self.advance() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => {
                self.depth -= 1;
                Ok(node)
            }
            _ => Err(ParseError::UnmatchedParen {
                offset: open.offset,
            }),
        }
    }
}
