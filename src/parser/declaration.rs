//! The declaration parser: `proc` (function) and the two `var`/`:=` forms.

use super::Parser;
use crate::ast::Decl;
use crate::error::{ParseError, ParseErrorKind};
use crate::scope::ObjectKind;
use crate::span::{Span, Spanned};
use crate::token::TokenKind;

impl Parser {
    /// Top-level dispatch: `proc` starts a function, `var`/an identifier
    /// starts a variable. Anything else is not a valid top-level item.
    pub(super) fn parse_declaration(&mut self) -> Result<Spanned<Decl>, ParseError> {
        match self.peek() {
            TokenKind::Proc => self.parse_function(),
            TokenKind::Var | TokenKind::Ident => self.parse_var(),
            got => Err(ParseError::new(
                ParseErrorKind::ExpectedTopLevelDecl { got },
                self.peek_span(),
            )),
        }
    }

    /// `for`'s init clause: a `Declaration` which must be a `Variable`.
    /// There's no `proc` form here, so this skips straight to `parse_var`
    /// rather than going through the top-level dispatch.
    pub(super) fn parse_declaration_no_scope_close(&mut self) -> Result<Spanned<Decl>, ParseError> {
        self.parse_var()
    }

    /// The two variable-declaration forms:
    /// `var T name = expr` and `name := expr`. Both insert a new `VAR`
    /// Object into the current scope, after the initializer is parsed (so
    /// `x := x + 1` resolves the right-hand `x` against whatever `x` was
    /// bound to *before* this declaration, matching the DEFINE rewrite in
    /// `parse_statement`).
    pub(super) fn parse_var(&mut self) -> Result<Spanned<Decl>, ParseError> {
        match self.peek() {
            TokenKind::Var => {
                let start = self.advance().span;
                let explicit_type = self.parse_type()?;
                let name = self.parse_ident()?;
                self.expect(TokenKind::Assign)?;
                let initializer = self.parse_expression(0)?;
                let span = Span::combine(start, initializer.span);

                self.scopes
                    .insert(&name.item.name, ObjectKind::Var, name.span)?;

                Ok(Spanned::new(
                    Decl::Variable {
                        name,
                        explicit_type: Some(explicit_type),
                        initializer,
                    },
                    span,
                ))
            }

            TokenKind::Ident => {
                let name = self.parse_ident()?;
                self.expect(TokenKind::Define)?;
                let initializer = self.parse_expression(0)?;
                let span = Span::combine(name.span, initializer.span);

                self.scopes
                    .insert(&name.item.name, ObjectKind::Var, name.span)?;

                Ok(Spanned::new(
                    Decl::Variable {
                        name,
                        explicit_type: None,
                        initializer,
                    },
                    span,
                ))
            }

            got => Err(ParseError::new(
                ParseErrorKind::ExpectedTopLevelDecl { got },
                self.peek_span(),
            )),
        }
    }

    /// `proc name :: type ident, type ident -> type { ... }`.
    ///
    /// The function's own Object is installed in the *enclosing* scope
    /// before the body is parsed, so the body can refer to the function by
    /// name for recursion. Arguments live in a scope pushed just for the
    /// body.
    pub(super) fn parse_function(&mut self) -> Result<Spanned<Decl>, ParseError> {
        let start = self.expect(TokenKind::Proc)?.span;
        let name = self.parse_ident()?;
        self.expect(TokenKind::DoubleColon)?;

        let mut args = Vec::new();
        if self.peek() != TokenKind::Arrow {
            loop {
                let ty = self.parse_type()?;
                let arg_name = self.parse_ident()?;
                let arg_span = Span::combine(ty.span, arg_name.span);
                args.push(Spanned::new(
                    Decl::Argument {
                        ty,
                        name: arg_name,
                    },
                    arg_span,
                ));

                if self.peek() == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::Arrow)?;
        let return_type = self.parse_type()?;

        self.scopes
            .insert(&name.item.name, ObjectKind::Func, name.span)?;

        self.scopes.push_scope();
        for arg in &args {
            if let Decl::Argument { name: arg_name, .. } = &arg.item {
                self.scopes
                    .insert(&arg_name.item.name, ObjectKind::Arg, arg_name.span)?;
            }
        }
        let body = self.parse_required_block()?;
        self.scopes.pop_scope();

        let span = Span::combine(start, body.span);
        let decl = Decl::Function {
            name,
            args,
            return_type,
            body: Box::new(body),
        };

        if self.peek() == TokenKind::Semi {
            self.advance();
        }

        Ok(Spanned::new(decl, span))
    }
}
