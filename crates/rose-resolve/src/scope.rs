// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scope tree for name resolution.

use std::collections::HashMap;

use rose_ast::ObjectId;

/// Unique identifier for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// The kind of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The whole source file.
    File,
    /// A nested block.
    Block,
}

/// A scope in the scope tree.
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub bindings: HashMap<String, ObjectId>,
}

/// Tree of scopes for name lookup.
///
/// Closed scopes stay in the tree so their bindings can be inspected after
/// parsing; only the chain from `current` outward is visible to lookup.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    current: Option<ScopeId>,
}

impl ScopeTree {
    /// Create an empty scope tree. No scope is open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new scope nested in the current one.
    pub fn push(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            id,
            parent: self.current,
            kind,
            bindings: HashMap::new(),
        });
        self.current = Some(id);
        id
    }

    /// Close the current scope and return to its parent.
    pub fn pop(&mut self) {
        self.current = self.current.and_then(|id| self.get(id)).and_then(|s| s.parent);
    }

    pub fn current(&self) -> Option<ScopeId> {
        self.current
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Look up a name in the current scope chain, innermost first.
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        let mut scope_id = self.current;
        while let Some(id) = scope_id {
            let scope = self.get(id)?;
            if let Some(&obj) = scope.bindings.get(name) {
                return Some(obj);
            }
            scope_id = scope.parent;
        }
        None
    }

    /// Bind `name` in the current scope. If the name is already bound there
    /// the existing binding is kept and returned.
    pub fn insert(&mut self, name: &str, obj: ObjectId) -> Option<ObjectId> {
        let id = self.current?;
        let scope = self.scopes.get_mut(id.0 as usize)?;
        if let Some(&prev) = scope.bindings.get(name) {
            return Some(prev);
        }
        scope.bindings.insert(name.to_string(), obj);
        None
    }
}
