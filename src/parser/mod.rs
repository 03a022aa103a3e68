//! The parser: token view, and the entry point that ties together the
//! expression, statement, and declaration layers.

mod declaration;
mod expression;
mod statement;

use crate::ast::File;
use crate::error::{ParseError, ParseErrorKind};
use crate::scope::ScopeStack;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parses a complete token stream (including its terminating `End` token)
/// into a `File`.
pub fn parse(tokens: Vec<Token>) -> Result<File, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse_file()
}

/// Owns the token cursor and the active scope chain. A single `Parser`
/// handles exactly one translation unit: no suspension points, no
/// reentrancy, no shared state with any other `Parser`.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    index: usize,
    scopes: ScopeStack,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Parser {
        Parser {
            tokens,
            index: 0,
            scopes: ScopeStack::new(),
        }
    }

    fn parse_file(&mut self) -> Result<File, ParseError> {
        let mut decls = Vec::new();
        while self.peek() != TokenKind::End {
            decls.push(self.parse_declaration()?);
        }
        Ok(File {
            decls,
            objects: self.scopes_take_objects(),
        })
    }

    fn scopes_take_objects(&mut self) -> Vec<crate::scope::Object> {
        // Swap out a fresh (empty) stack; the real one is consumed here,
        // once, at the very end of parsing a file.
        std::mem::take(&mut self.scopes).into_objects()
    }

    // --- Token view ---

    fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_span(&self) -> Span {
        self.current().span
    }

    /// Returns the current token and moves the cursor forward by one,
    /// unless the current token is `End` — the lexer's terminating token is
    /// never advanced past.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::End {
            self.index += 1;
        }
        token
    }

    /// Consumes the current token if it matches `kind`, else fails with
    /// `UnexpectedToken`.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.peek() == kind {
            Ok(self.advance())
        } else {
            Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: kind,
                    got: self.peek(),
                },
                self.peek_span(),
            ))
        }
    }

    /// Captures the cursor position for speculative lookahead (used by the
    /// `IDENT` head of `smtd` to peek past the identifier for `++`/`--`
    /// before committing to the expression-rewrite fallthrough).
    fn checkpoint(&self) -> usize {
        self.index
    }

    /// Rewinds the cursor to a position previously returned by `checkpoint`.
    fn restore(&mut self, checkpoint: usize) {
        self.index = checkpoint;
    }

    /// Accepts either the explicit statement terminator `Semi` (consuming
    /// it) or the synthetic `End` token (left unconsumed, since the parser
    /// never advances past it).
    fn expect_semi(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            TokenKind::Semi => {
                self.advance();
                Ok(())
            }
            TokenKind::End => Ok(()),
            got => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: TokenKind::Semi,
                    got,
                },
                self.peek_span(),
            )),
        }
    }
}
