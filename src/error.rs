//! Parser errors.
//!
//! A plain enum with a manual `Display`, no `thiserror`. Parsing never
//! recovers, so there is no need for an error type richer than "what went
//! wrong, and where".

use std::fmt;

use crate::span::Span;
use crate::token::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// `expect`/`expect_semi` saw a token kind other than the one required.
    UnexpectedToken { expected: TokenKind, got: TokenKind },
    /// `nud` was asked to start an expression from a non-prefix token.
    ExpectedPrefix { got: TokenKind },
    /// `led` was asked to continue an expression from a non-infix token.
    ExpectedInfix { got: TokenKind },
    /// `smtd` saw a token that doesn't start any known statement.
    ExpectedStatement { got: TokenKind },
    /// The expression-rewrite fallthrough got something other than an
    /// assignment-shaped `Binary`.
    ExpectedAssign { got: TokenKind },
    /// A statement required to be a `Block` (if/for bodies, function bodies)
    /// was something else.
    ExpectedBlock,
    /// The left-hand side of `:=`, or a name being declared, wasn't a plain
    /// identifier.
    ExpectedIdent,
    /// A top-level declaration's head token was neither `proc`, `var`, nor an
    /// identifier.
    ExpectedTopLevelDecl { got: TokenKind },
    /// `InsertScope` found the name already bound in the innermost scope.
    Redefinition { name: String },
    /// `{` encountered in infix position (brace-initializer syntax). Not
    /// supported: there's no production that gives it a meaning, so it's
    /// rejected outright rather than silently dropped.
    BraceInitializerUnsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError { kind, span }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseErrorKind::*;
        match &self.kind {
            UnexpectedToken { expected, got } => {
                write!(f, "expected {}, found {}", expected, got)
            }
            ExpectedPrefix { got } => write!(f, "expected an expression, found {}", got),
            ExpectedInfix { got } => write!(f, "{} cannot continue an expression here", got),
            ExpectedStatement { got } => write!(f, "expected a statement, found {}", got),
            ExpectedAssign { got } => write!(f, "expected an assignment, found {}", got),
            ExpectedBlock => write!(f, "expected a block `{{ ... }}`"),
            ExpectedIdent => write!(f, "expected an identifier"),
            ExpectedTopLevelDecl { got } => {
                write!(f, "expected a top-level declaration, found {}", got)
            }
            Redefinition { name } => write!(f, "`{}` is already defined in this scope", name),
            BraceInitializerUnsupported => {
                write!(f, "brace-initializer expressions are not supported")
            }
        }?;
        write!(f, " at {}", self.span)
    }
}

impl std::error::Error for ParseError {}
