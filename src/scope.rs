//! Lexical scopes and the Object arena.
//!
//! The original implementation this is modeled on heap-allocates each
//! `Object` and has `Ident`s point directly into the scope chain, which only
//! works because the whole arena is leaked for the process lifetime. A tree
//! that owns its children (as our AST does) can't borrow into a stack that
//! gets popped out from under it, so Objects live in a flat arena owned by
//! the `Parser` (and handed off to `File` once parsing finishes), and
//! `Ident`s carry a `Copy`able index (`ObjectId`) rather than a reference.

use std::collections::HashMap;

use crate::error::{ParseError, ParseErrorKind};
use crate::span::Span;

/// What kind of binding an `Object` represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Var,
    Arg,
    Func,
}

/// A resolved binding: a name, and what kind of thing it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub name: String,
    pub kind: ObjectKind,
}

/// A stable, `Copy`able handle to an `Object` in the arena. Never reused,
/// never invalidated: once issued, an `ObjectId` stays valid for the
/// lifetime of the `File` it ends up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// One lexical scope's name→Object mapping.
#[derive(Debug, Default)]
struct Scope {
    bindings: HashMap<String, ObjectId>,
}

/// The stack of active scopes plus the arena of every Object allocated so
/// far. Pushed on function entry and on block-statement entry; popped on
/// exit.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
    objects: Vec<Object>,
}

impl Default for ScopeStack {
    fn default() -> ScopeStack {
        ScopeStack::new()
    }
}

impl ScopeStack {
    pub fn new() -> ScopeStack {
        // The outermost (file-level) scope is always present.
        ScopeStack {
            scopes: vec![Scope::default()],
            objects: Vec::new(),
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Pops the innermost scope. Its Objects remain alive in the arena;
    /// only the name→Object mapping used for lookup is discarded.
    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "cannot pop the file scope");
        self.scopes.pop();
    }

    /// Inserts a new binding into the innermost scope. Fails with
    /// `Redefinition` if the name is already bound there (shadowing an
    /// outer scope's binding of the same name is fine).
    pub fn insert(
        &mut self,
        name: &str,
        kind: ObjectKind,
        span: Span,
    ) -> Result<ObjectId, ParseError> {
        let innermost = self
            .scopes
            .last_mut()
            .expect("scope stack is never empty");

        if innermost.bindings.contains_key(name) {
            return Err(ParseError::new(
                ParseErrorKind::Redefinition {
                    name: name.to_string(),
                },
                span,
            ));
        }

        let id = ObjectId(self.objects.len());
        self.objects.push(Object {
            name: name.to_string(),
            kind,
        });
        innermost.bindings.insert(name.to_string(), id);
        Ok(id)
    }

    /// Looks up a name from the innermost scope outward; the first hit wins.
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.bindings.get(name).copied())
    }

    pub fn get(&self, id: ObjectId) -> &Object {
        &self.objects[id.0]
    }

    /// Consumes the stack, returning the Object arena for the finished
    /// `File` to own. Only valid once every scope but the file scope has
    /// been popped.
    pub fn into_objects(self) -> Vec<Object> {
        self.objects
    }
}
