//! The statement parser: `smtd`, the expression-rewrite fallthrough, and
//! `Block`/`If`/`For`.

use super::Parser;
use crate::ast::{AssignOp, Decl, Expr, LiteralKind, Operator, Stmt};
use crate::error::{ParseError, ParseErrorKind};
use crate::span::{Span, Spanned};
use crate::token::TokenKind;

impl Parser {
    pub(super) fn parse_statement(&mut self) -> Result<Spanned<Stmt>, ParseError> {
        if let Some(stmt) = self.smtd()? {
            return Ok(stmt);
        }

        // Fallthrough: what follows must be an assignment-shaped `Binary`
        // expression, which we rewrite into `Assign` or `Declare`.
        let expr = self.parse_expression(0)?;
        let Spanned { item, span } = expr;

        let (op, left, right) = match item {
            Expr::Binary { op, left, right } if op.is_assignment() => (op, *left, *right),
            other => {
                let got = self.binary_op_token_kind(&other);
                return Err(ParseError::new(ParseErrorKind::ExpectedAssign { got }, span));
            }
        };

        if op == Operator::Define {
            let name = match left.item {
                Expr::Ident(ident) => Spanned::new(ident, left.span),
                _ => return Err(ParseError::new(ParseErrorKind::ExpectedIdent, left.span)),
            };
            self.scopes
                .insert(&name.item.name, crate::scope::ObjectKind::Var, name.span)?;
            let dcl = Decl::Variable {
                name,
                explicit_type: None,
                initializer: right,
            };
            return Ok(Spanned::new(Stmt::Declare(Box::new(Spanned::new(dcl, span))), span));
        }

        let assign_op = AssignOp::try_from(op)
            .expect("op.is_assignment() guarantees this conversion succeeds");
        Ok(Spanned::new(
            Stmt::Assign {
                target: left,
                op: assign_op,
                value: right,
            },
            span,
        ))
    }

    /// Best-effort token kind for an `ExpectedAssign` error message when the
    /// fallthrough expression wasn't even shaped like a `Binary`.
    fn binary_op_token_kind(&self, expr: &Expr) -> TokenKind {
        match expr {
            Expr::Ident(_) => TokenKind::Ident,
            Expr::Literal { .. } => TokenKind::Int,
            _ => TokenKind::End,
        }
    }

    /// Dispatches on the head token. Returns `Ok(None)` for the `IDENT`
    /// head-token case when it isn't `++`/`--`, signaling the caller to fall
    /// through to the expression-rewrite path.
    fn smtd(&mut self) -> Result<Option<Spanned<Stmt>>, ParseError> {
        match self.peek() {
            TokenKind::Return => {
                let start = self.advance().span;
                let value = self.parse_expression(0)?;
                let span = Span::combine(start, value.span);
                Ok(Some(Spanned::new(Stmt::Return(value), span)))
            }

            TokenKind::LBrace => Ok(Some(self.parse_block()?)),

            TokenKind::If => Ok(Some(self.parse_if()?)),

            TokenKind::For => Ok(Some(self.parse_for()?)),

            TokenKind::Var => {
                let dcl = self.parse_var()?;
                let span = dcl.span;
                Ok(Some(Spanned::new(Stmt::Declare(Box::new(dcl)), span)))
            }

            TokenKind::Ident => {
                let checkpoint = self.checkpoint();
                let ident = self.parse_ident()?;
                match self.peek() {
                    TokenKind::Inc => {
                        self.advance();
                        Ok(Some(self.desugar_inc_dec(ident, AssignOp::AddAssign)))
                    }
                    TokenKind::Dec => {
                        self.advance();
                        Ok(Some(self.desugar_inc_dec(ident, AssignOp::SubAssign)))
                    }
                    _ => {
                        // Not `++`/`--`: rewind so the fallthrough path can
                        // reparse this identifier as part of a full
                        // expression.
                        self.restore(checkpoint);
                        Ok(None)
                    }
                }
            }

            got => Err(ParseError::new(ParseErrorKind::ExpectedStatement { got }, self.peek_span())),
        }
    }

    fn desugar_inc_dec(
        &self,
        ident: Spanned<crate::ast::Ident>,
        op: AssignOp,
    ) -> Spanned<Stmt> {
        let span = ident.span;
        let target = ident.map(Expr::Ident);
        let one = Spanned::new(
            Expr::Literal {
                kind: LiteralKind::Int,
                lexeme: "1".to_string(),
            },
            Span::empty(),
        );
        Spanned::new(
            Stmt::Assign {
                target,
                op,
                value: one,
            },
            span,
        )
    }

    fn parse_block(&mut self) -> Result<Spanned<Stmt>, ParseError> {
        let open = self.expect(TokenKind::LBrace)?;
        self.scopes.push_scope();

        let mut body = Vec::new();
        while self.peek() != TokenKind::RBrace {
            body.push(self.parse_statement()?);
            if self.peek() != TokenKind::RBrace {
                self.expect_semi()?;
            }
        }
        let close = self.expect(TokenKind::RBrace)?;
        self.scopes.pop_scope();

        let span = Span::combine(open.span, close.span);
        Ok(Spanned::new(Stmt::Block(body), span))
    }

    /// Parses a statement that is required to be a `Block` — if/for bodies
    /// and function bodies all call through here rather than
    /// `parse_statement` directly, since none of them accept a bare
    /// statement in that position.
    pub(super) fn parse_required_block(&mut self) -> Result<Spanned<Stmt>, ParseError> {
        if self.peek() != TokenKind::LBrace {
            return Err(ParseError::new(ParseErrorKind::ExpectedBlock, self.peek_span()));
        }
        self.parse_block()
    }

    fn parse_if(&mut self) -> Result<Spanned<Stmt>, ParseError> {
        let start = self.expect(TokenKind::If)?.span;
        let cond = self.parse_expression(0)?;
        let then_branch = self.parse_required_block()?;

        let else_branch = if self.peek() == TokenKind::Else {
            self.advance();
            if self.peek() == TokenKind::If {
                Some(Box::new(self.parse_if()?))
            } else {
                let block = self.parse_required_block()?;
                let span = block.span;
                Some(Box::new(Spanned::new(
                    Stmt::If {
                        cond: None,
                        then_branch: Box::new(block),
                        else_branch: None,
                    },
                    span,
                )))
            }
        } else {
            None
        };

        let end = else_branch
            .as_ref()
            .map(|b| b.span)
            .unwrap_or(then_branch.span);
        let span = Span::combine(start, end);
        Ok(Spanned::new(
            Stmt::If {
                cond: Some(cond),
                then_branch: Box::new(then_branch),
                else_branch,
            },
            span,
        ))
    }

    fn parse_for(&mut self) -> Result<Spanned<Stmt>, ParseError> {
        let start = self.expect(TokenKind::For)?.span;

        let init = self.parse_declaration_no_scope_close()?;
        match &init.item {
            Decl::Variable { .. } => {}
            _ => return Err(ParseError::new(ParseErrorKind::ExpectedIdent, init.span)),
        }
        self.expect_semi_strict()?;

        let cond = self.parse_expression(0)?;
        self.expect_semi_strict()?;

        let post = self.parse_statement()?;
        let body = self.parse_required_block()?;

        let span = Span::combine(start, body.span);
        Ok(Spanned::new(
            Stmt::For {
                init: Box::new(init),
                cond,
                post: Box::new(post),
                body: Box::new(body),
            },
            span,
        ))
    }

    /// `for`'s two interior separators are always the explicit `;` — unlike
    /// `expect_semi`, `End` is never an acceptable stand-in mid-header.
    fn expect_semi_strict(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Semi).map(|_| ())
    }
}
