//! The Pratt expression parser: `nud`/`led` and the precedence loop.

use super::Parser;
use crate::ast::{Expr, Ident, LiteralKind, Operator, UnaryOp};
use crate::error::{ParseError, ParseErrorKind};
use crate::precedence::lbp;
use crate::span::{Span, Spanned};
use crate::token::{Token, TokenKind};

impl Parser {
    /// `parse_expression(rbp)`: consumes tokens while the next token's LBP
    /// is strictly greater than `rbp`, building up `left` via `led`.
    pub(super) fn parse_expression(&mut self, rbp: i32) -> Result<Spanned<Expr>, ParseError> {
        let token = self.advance();
        let mut left = self.nud(token)?;

        while lbp(self.peek()) > rbp {
            let token = self.advance();
            left = self.led(token, left)?;
        }

        Ok(left)
    }

    fn nud(&mut self, token: Token) -> Result<Spanned<Expr>, ParseError> {
        match token.kind {
            TokenKind::Ident => {
                let resolved = self.scopes.lookup(&token.lexeme);
                Ok(Spanned::new(
                    Expr::Ident(Ident {
                        name: token.lexeme,
                        resolved,
                    }),
                    token.span,
                ))
            }

            TokenKind::Int => Ok(self.literal(token, LiteralKind::Int)),
            TokenKind::Float => Ok(self.literal(token, LiteralKind::Float)),
            TokenKind::Hex => Ok(self.literal(token, LiteralKind::Hex)),
            TokenKind::Octal => Ok(self.literal(token, LiteralKind::Octal)),
            TokenKind::String => Ok(self.literal(token, LiteralKind::String)),

            TokenKind::Not | TokenKind::Sub => {
                let op = if token.kind == TokenKind::Not {
                    UnaryOp::Not
                } else {
                    UnaryOp::Neg
                };
                let operand = self.parse_expression(60)?;
                let span = Span::combine(token.span, operand.span);
                Ok(Spanned::new(
                    Expr::Unary {
                        op,
                        operand: Box::new(operand),
                    },
                    span,
                ))
            }

            TokenKind::LBrace => self.key_value_list(token.span),
            TokenKind::LBrack => self.array_literal(token.span),

            got => Err(ParseError::new(
                ParseErrorKind::ExpectedPrefix { got },
                token.span,
            )),
        }
    }

    fn literal(&self, token: Token, kind: LiteralKind) -> Spanned<Expr> {
        Spanned::new(
            Expr::Literal {
                kind,
                lexeme: token.lexeme,
            },
            token.span,
        )
    }

    fn led(&mut self, token: Token, left: Spanned<Expr>) -> Result<Spanned<Expr>, ParseError> {
        let bp = lbp(token.kind);

        let op = match token.kind {
            TokenKind::Add => Some(Operator::Add),
            TokenKind::Sub => Some(Operator::Sub),
            TokenKind::Mul => Some(Operator::Mul),
            TokenKind::Quo => Some(Operator::Quo),
            TokenKind::Rem => Some(Operator::Rem),
            TokenKind::Eql => Some(Operator::Eql),
            TokenKind::Neq => Some(Operator::Neq),
            TokenKind::Gtr => Some(Operator::Gtr),
            TokenKind::Lss => Some(Operator::Lss),
            TokenKind::Geq => Some(Operator::Geq),
            TokenKind::Leq => Some(Operator::Leq),
            _ => None,
        };
        if let Some(op) = op {
            // Left-associative: the right operand binds at this operator's
            // own precedence.
            let right = self.parse_expression(bp)?;
            let span = Span::combine(left.span, right.span);
            return Ok(Spanned::new(
                Expr::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            ));
        }

        match token.kind {
            TokenKind::Period => {
                let field = self.parse_expression(bp)?;
                let span = Span::combine(left.span, field.span);
                Ok(Spanned::new(
                    Expr::Selector {
                        receiver: Box::new(left),
                        field: Box::new(field),
                    },
                    span,
                ))
            }

            TokenKind::LBrack => {
                let index = self.parse_expression(0)?;
                let end = self.expect(TokenKind::RBrack)?;
                let span = Span::combine(left.span, end.span);
                Ok(Spanned::new(
                    Expr::Index {
                        receiver: Box::new(left),
                        index: Box::new(index),
                    },
                    span,
                ))
            }

            TokenKind::LParen => {
                let mut args = Vec::new();
                if self.peek() != TokenKind::RParen {
                    loop {
                        args.push(self.parse_expression(0)?);
                        if self.peek() != TokenKind::RParen {
                            self.expect(TokenKind::Comma)?;
                        } else {
                            break;
                        }
                    }
                }
                let end = self.expect(TokenKind::RParen)?;
                let span = Span::combine(left.span, end.span);
                Ok(Spanned::new(
                    Expr::Call {
                        callee: Box::new(left),
                        args,
                    },
                    span,
                ))
            }

            // Right-associative: `LAND`, `LOR`, all assignment kinds, and
            // `DEFINE` bind their right operand one level looser, which is
            // what makes `a = b = c` parse as `a = (b = c)`.
            TokenKind::Land
            | TokenKind::Lor
            | TokenKind::Assign
            | TokenKind::AddAssign
            | TokenKind::SubAssign
            | TokenKind::MulAssign
            | TokenKind::RemAssign
            | TokenKind::OrAssign
            | TokenKind::ShlAssign
            | TokenKind::Define => {
                let op = match token.kind {
                    TokenKind::Land => Operator::Land,
                    TokenKind::Lor => Operator::Lor,
                    TokenKind::Assign => Operator::Assign,
                    TokenKind::AddAssign => Operator::AddAssign,
                    TokenKind::SubAssign => Operator::SubAssign,
                    TokenKind::MulAssign => Operator::MulAssign,
                    TokenKind::RemAssign => Operator::RemAssign,
                    TokenKind::OrAssign => Operator::OrAssign,
                    TokenKind::ShlAssign => Operator::ShlAssign,
                    TokenKind::Define => Operator::Define,
                    _ => unreachable!(),
                };
                let right = self.parse_expression(bp - 1)?;
                let span = Span::combine(left.span, right.span);
                Ok(Spanned::new(
                    Expr::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                ))
            }

            // Reserved for brace-initializer syntax, which has no
            // production here: `expr { ... }` is rejected rather than
            // silently ignored.
            TokenKind::LBrace => Err(ParseError::new(
                ParseErrorKind::BraceInitializerUnsupported,
                token.span,
            )),

            got => Err(ParseError::new(
                ParseErrorKind::ExpectedInfix { got },
                token.span,
            )),
        }
    }

    /// `{ k: v, v2, ... }` — a brace-delimited key/value list literal. A
    /// trailing comma is not permitted: `{ a, }` is rejected, not silently
    /// accepted. `open` is the span of the already-consumed `{`.
    fn key_value_list(&mut self, open: Span) -> Result<Spanned<Expr>, ParseError> {
        let mut entries = Vec::new();
        if self.peek() != TokenKind::RBrace {
            loop {
                entries.push(self.key_value_entry()?);
                if self.peek() == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let close = self.expect(TokenKind::RBrace)?;
        let span = Span::combine(open, close.span);
        Ok(Spanned::new(Expr::KeyValueList { entries }, span))
    }

    /// An expression, optionally followed by `: value` to give it a key.
    fn key_value_entry(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let key_or_value = self.parse_expression(0)?;
        if self.peek() == TokenKind::Colon {
            self.advance();
            let value = self.parse_expression(0)?;
            let span = Span::combine(key_or_value.span, value.span);
            Ok(Spanned::new(
                Expr::KeyValue {
                    key: Some(Box::new(key_or_value)),
                    value: Box::new(value),
                },
                span,
            ))
        } else {
            let span = key_or_value.span;
            Ok(Spanned::new(
                Expr::KeyValue {
                    key: None,
                    value: Box::new(key_or_value),
                },
                span,
            ))
        }
    }

    /// `[ e, e, ... ]` — a bracket-delimited array literal. `open` is the
    /// span of the already-consumed `[`.
    fn array_literal(&mut self, open: Span) -> Result<Spanned<Expr>, ParseError> {
        let mut elements = Vec::new();
        while self.peek() != TokenKind::RBrack {
            elements.push(self.parse_expression(0)?);
            if self.peek() != TokenKind::RBrack {
                self.expect(TokenKind::Comma)?;
            }
        }
        let close = self.expect(TokenKind::RBrack)?;
        let span = Span::combine(open, close.span);
        Ok(Spanned::new(Expr::Array { elements }, span))
    }

    /// `parse_type`: an identifier, optionally followed by `[ length ]` to
    /// form an `ArrayType`.
    pub(super) fn parse_type(&mut self) -> Result<Spanned<Expr>, ParseError> {
        let ident = self.parse_ident()?.map(Expr::Ident);
        if self.peek() == TokenKind::LBrack {
            self.advance();
            let length = self.parse_expression(0)?;
            let close = self.expect(TokenKind::RBrack)?;
            let span = Span::combine(ident.span, close.span);
            Ok(Spanned::new(
                Expr::ArrayType {
                    element_type: Box::new(ident),
                    length: Box::new(length),
                },
                span,
            ))
        } else {
            Ok(ident)
        }
    }

    /// Parses a single identifier token into an `Ident`, resolving it
    /// against the current scope. Fails with `ExpectedIdent` if the current
    /// token isn't an identifier.
    pub(super) fn parse_ident(&mut self) -> Result<Spanned<Ident>, ParseError> {
        if self.peek() != TokenKind::Ident {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedIdent,
                self.peek_span(),
            ));
        }
        let token = self.advance();
        let resolved = self.scopes.lookup(&token.lexeme);
        Ok(Spanned::new(
            Ident {
                name: token.lexeme,
                resolved,
            },
            token.span,
        ))
    }
}
