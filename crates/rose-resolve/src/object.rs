// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declared objects and the object table.

use rose_ast::{NodeId, ObjectId, Pos};

/// What a declared name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjKind {
    /// Immutable binding: `const` and `let`.
    Const,
    /// Mutable binding: `var`.
    Var,
}

impl ObjKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjKind::Const => "const",
            ObjKind::Var => "var",
        }
    }
}

/// A declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjKind,
    /// The declaring node (a value spec).
    pub decl: NodeId,
    /// Declaration-specific data: the value spec's index inside its group.
    pub data: usize,
    /// Position of the declaring identifier.
    pub pos: Pos,
}

/// Arena of all objects declared in one parse.
#[derive(Debug, Default, Clone)]
pub struct ObjectTable {
    objects: Vec<Object>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Insert a new object and return its ID.
    pub fn insert(&mut self, name: String, kind: ObjKind, decl: NodeId, data: usize, pos: Pos) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(Object {
            id,
            name,
            kind,
            decl,
            data,
            pos,
        });
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }
}
