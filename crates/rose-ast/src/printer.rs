// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! S-expression rendering of syntax trees.
//!
//! Used by `rose parse` and by tests that compare tree shapes:
//!
//! ```text
//! var x int = a or b and c   =>   (var (spec (x) int ((or a (and b c)))))
//! ```

use std::fmt::{self, Write};

use crate::decl::{Decl, DeclKind, ValueSpec};
use crate::expr::{Expr, ExprKind};
use crate::stmt::{Stmt, StmtKind};

/// Renders a node as an S-expression.
pub trait ToSexp {
    fn write_sexp(&self, out: &mut dyn Write) -> fmt::Result;

    fn to_sexp(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_sexp(&mut out);
        out
    }
}

impl ToSexp for Expr {
    fn write_sexp(&self, out: &mut dyn Write) -> fmt::Result {
        match &self.kind {
            ExprKind::Bad { .. } => out.write_str("(bad)"),
            ExprKind::Ident(ident) => out.write_str(&ident.name),
            ExprKind::BasicLit(lit) => out.write_str(&lit.value),
            ExprKind::Paren { expr, .. } => {
                out.write_str("(paren ")?;
                expr.write_sexp(out)?;
                out.write_char(')')
            }
            ExprKind::Unary { op, operand, .. } => {
                write!(out, "({} ", op.as_str())?;
                operand.write_sexp(out)?;
                out.write_char(')')
            }
            ExprKind::Binary { lhs, op, rhs, .. } => {
                write!(out, "({} ", op.as_str())?;
                lhs.write_sexp(out)?;
                out.write_char(' ')?;
                rhs.write_sexp(out)?;
                out.write_char(')')
            }
        }
    }
}

fn write_list(out: &mut dyn Write, exprs: &[Expr]) -> fmt::Result {
    out.write_char('(')?;
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        expr.write_sexp(out)?;
    }
    out.write_char(')')
}

impl ToSexp for ValueSpec {
    fn write_sexp(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str("(spec (")?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            out.write_str(&name.name)?;
        }
        out.write_str(") ")?;
        match &self.ty {
            Some(ty) => ty.write_sexp(out)?,
            None => out.write_str("nil")?,
        }
        out.write_char(' ')?;
        write_list(out, &self.values)?;
        out.write_char(')')
    }
}

impl ToSexp for Decl {
    fn write_sexp(&self, out: &mut dyn Write) -> fmt::Result {
        match &self.kind {
            DeclKind::Bad { .. } => out.write_str("(bad-decl)"),
            DeclKind::Gen(g) => {
                write!(out, "({}", g.keyword)?;
                for spec in &g.specs {
                    out.write_char(' ')?;
                    spec.write_sexp(out)?;
                }
                out.write_char(')')
            }
        }
    }
}

impl ToSexp for Stmt {
    fn write_sexp(&self, out: &mut dyn Write) -> fmt::Result {
        match &self.kind {
            StmtKind::Bad { .. } => out.write_str("(bad-stmt)"),
            StmtKind::Decl(decl) => decl.write_sexp(out),
            StmtKind::Empty { .. } => out.write_str("(empty)"),
            StmtKind::Expr(expr) => expr.write_sexp(out),
            StmtKind::IncDec { expr, inc, .. } => {
                out.write_str(if *inc { "(++ " } else { "(-- " })?;
                expr.write_sexp(out)?;
                out.write_char(')')
            }
            StmtKind::Assign { lhs, op, rhs, .. } => {
                write!(out, "({} ", op.as_str())?;
                write_list(out, lhs)?;
                out.write_char(' ')?;
                write_list(out, rhs)?;
                out.write_char(')')
            }
        }
    }
}
