// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Incremental resolver driven by the parser.

use rose_ast::expr::{Binding, Ident};
use rose_ast::{NodeId, ObjectId};

use crate::error::ResolveError;
use crate::object::{ObjKind, Object, ObjectTable};
use crate::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::Resolution;

/// Declares and resolves identifiers while the parser walks the source.
///
/// The parser opens a scope for each binding region, calls [`declare`] for
/// every name a declaration introduces and [`resolve`] for every name used
/// as an operand. Names found in no open scope are collected rather than
/// reported, since they may be declared in another source unit.
///
/// [`declare`]: Resolver::declare
/// [`resolve`]: Resolver::resolve
#[derive(Debug, Default)]
pub struct Resolver {
    scopes: ScopeTree,
    objects: ObjectTable,
    unresolved: Vec<Ident>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_scope(&mut self, kind: ScopeKind) -> ScopeId {
        self.scopes.push(kind)
    }

    pub fn close_scope(&mut self) {
        self.scopes.pop();
    }

    /// Create an object for `ident` and bind it in the current scope.
    ///
    /// The identifier always ends up bound to its new object. The blank
    /// identifier is never entered into a scope. If the name already exists
    /// in the current scope the earlier binding stays visible and a
    /// redeclaration error is returned.
    pub fn declare(
        &mut self,
        ident: &mut Ident,
        kind: ObjKind,
        decl: NodeId,
        data: usize,
    ) -> Result<ObjectId, ResolveError> {
        debug_assert_eq!(ident.binding, Binding::Unbound, "identifier already declared or resolved");
        let id = self.objects.insert(ident.name.clone(), kind, decl, data, ident.pos);
        ident.binding = Binding::Resolved(id);
        if ident.is_blank() {
            return Ok(id);
        }
        if let Some(prev) = self.scopes.insert(&ident.name, id) {
            let previous = self.objects.get(prev).map(|o| o.pos).unwrap_or_default();
            return Err(ResolveError::redeclared(ident.name.clone(), ident.pos, previous));
        }
        Ok(id)
    }

    /// Bind `ident` to the object it denotes, or collect it as unresolved.
    /// Returns the object when one was found.
    pub fn resolve(&mut self, ident: &mut Ident) -> Option<ObjectId> {
        self.try_resolve(ident, true)
    }

    /// Like [`Resolver::resolve`], but only collects the identifier when
    /// `collect` is set.
    pub fn try_resolve(&mut self, ident: &mut Ident, collect: bool) -> Option<ObjectId> {
        if ident.is_blank() {
            return None;
        }
        if let Some(id) = self.scopes.lookup(&ident.name) {
            ident.binding = Binding::Resolved(id);
            return Some(id);
        }
        if collect {
            ident.binding = Binding::Unresolved;
            self.unresolved.push(ident.clone());
        }
        None
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn lookup(&self, name: &str) -> Option<&Object> {
        self.scopes.lookup(name).and_then(|id| self.objects.get(id))
    }

    /// Consume the resolver, handing over everything it collected.
    pub fn finish(self) -> Resolution {
        Resolution {
            scopes: self.scopes,
            objects: self.objects,
            unresolved: self.unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResolveErrorKind;
    use rose_ast::Pos;

    fn ident(pos: u32, name: &str) -> Ident {
        Ident::new(NodeId(pos), Pos(pos), name)
    }

    #[test]
    fn declare_then_resolve() {
        let mut r = Resolver::new();
        r.open_scope(ScopeKind::File);
        let mut a = ident(1, "a");
        let id = r.declare(&mut a, ObjKind::Var, NodeId(10), 0).unwrap();
        assert_eq!(a.binding, Binding::Resolved(id));

        let mut use_a = ident(20, "a");
        assert_eq!(r.resolve(&mut use_a), Some(id));
        assert_eq!(use_a.binding, Binding::Resolved(id));
        assert_eq!(r.object(id).map(|o| o.decl), Some(NodeId(10)));
    }

    #[test]
    fn redeclaration_in_same_scope() {
        let mut r = Resolver::new();
        r.open_scope(ScopeKind::File);
        r.declare(&mut ident(1, "x"), ObjKind::Const, NodeId(0), 0).unwrap();
        let err = r.declare(&mut ident(9, "x"), ObjKind::Const, NodeId(1), 0).unwrap_err();
        assert_eq!(err.pos, Pos(9));
        assert_eq!(err.previous(), Some(Pos(1)));
        assert_eq!(
            err.kind,
            ResolveErrorKind::Redeclared { name: "x".into(), previous: Pos(1) }
        );
        assert_eq!(err.to_string(), "x redeclared in this block");
        // The first declaration wins
        assert_eq!(r.lookup("x").map(|o| o.pos), Some(Pos(1)));
    }

    #[test]
    fn nested_scope_may_redeclare() {
        let mut r = Resolver::new();
        r.open_scope(ScopeKind::File);
        r.declare(&mut ident(1, "x"), ObjKind::Var, NodeId(0), 0).unwrap();
        r.open_scope(ScopeKind::Block);
        assert!(r.declare(&mut ident(5, "x"), ObjKind::Var, NodeId(1), 0).is_ok());
        assert_eq!(r.lookup("x").map(|o| o.pos), Some(Pos(5)));
        r.close_scope();
        assert_eq!(r.lookup("x").map(|o| o.pos), Some(Pos(1)));
    }

    #[test]
    fn unresolved_are_collected() {
        let mut r = Resolver::new();
        r.open_scope(ScopeKind::File);
        let mut y = ident(3, "y");
        assert_eq!(r.resolve(&mut y), None);
        assert_eq!(y.binding, Binding::Unresolved);

        let mut z = ident(4, "z");
        assert_eq!(r.try_resolve(&mut z, false), None);
        assert_eq!(z.binding, Binding::Unbound);

        let res = r.finish();
        assert_eq!(res.unresolved.len(), 1);
        assert_eq!(res.unresolved[0].name, "y");
    }

    #[test]
    fn blank_is_never_bound_or_collected() {
        let mut r = Resolver::new();
        r.open_scope(ScopeKind::File);
        let mut first = ident(1, "_");
        let mut second = ident(3, "_");
        assert!(r.declare(&mut first, ObjKind::Var, NodeId(0), 0).is_ok());
        assert!(r.declare(&mut second, ObjKind::Var, NodeId(0), 1).is_ok());

        let mut use_blank = ident(7, "_");
        assert_eq!(r.resolve(&mut use_blank), None);
        assert_eq!(use_blank.binding, Binding::Unbound);
        assert!(r.finish().unresolved.is_empty());
    }
}
