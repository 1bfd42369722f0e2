// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Name resolution for the Rose language.
//!
//! Tracks nested scopes while parsing, binds identifier uses to the objects
//! that declare them and defers names no open scope knows about.

mod error;
mod object;
mod resolver;
mod scope;

pub use error::{ResolveError, ResolveErrorKind};
pub use object::{ObjKind, Object, ObjectTable};
pub use resolver::Resolver;
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};

use rose_ast::expr::Ident;

/// Everything the resolver learned about one source unit.
#[derive(Debug, Default, Clone)]
pub struct Resolution {
    pub scopes: ScopeTree,
    pub objects: ObjectTable,
    /// Identifier uses left for a later, cross-unit pass.
    pub unresolved: Vec<Ident>,
}
