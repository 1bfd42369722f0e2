// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source files and the position table.
//!
//! Every parsed source unit is registered in a [`FileSet`], which hands it a
//! disjoint range of [`Pos`] values. A position can then be turned back into a
//! file name, line and column without the parser carrying that information
//! around in every token.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::span::{LineMap, Pos};

/// A source unit that does not fit in the 32-bit position space.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("{name}: file too large ({size} bytes, at most {} allowed)", u32::MAX)]
    TooLarge { name: String, size: usize },
    #[error("{name}: no positions left in the file set")]
    Exhausted { name: String },
}

/// A resolved source location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub filename: String,
    /// Byte offset, starting at 0.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number in bytes, starting at 1.
    pub column: u32,
}

impl Position {
    pub fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return if self.filename.is_empty() {
                f.write_str("-")
            } else {
                f.write_str(&self.filename)
            };
        }
        if self.filename.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.filename, self.line, self.column)
        }
    }
}

/// One source unit registered in a [`FileSet`].
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    base: u32,
    size: u32,
    lines: LineMap,
}

impl SourceFile {
    /// Build a standalone file with the given base. Most callers go through
    /// [`FileSet::add_file`] instead.
    ///
    /// Every position of the file, EOF included, must fit in a `u32`.
    pub fn new(name: impl Into<String>, base: u32, source: &str) -> Result<Self, SourceError> {
        let name = name.into();
        let size = match u32::try_from(source.len()) {
            Ok(size) => size,
            Err(_) => {
                return Err(SourceError::TooLarge {
                    name,
                    size: source.len(),
                })
            }
        };
        if base.checked_add(size).is_none() {
            return Err(SourceError::Exhausted { name });
        }
        Ok(SourceFile {
            name,
            base,
            size,
            lines: LineMap::new(source),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn line_count(&self) -> u32 {
        self.lines.line_count()
    }

    /// Position for a byte offset. Offsets past the end clamp to EOF.
    pub fn pos(&self, offset: usize) -> Pos {
        let offset = offset.min(self.size as usize) as u32;
        Pos(self.base + offset)
    }

    /// Byte offset of a position inside this file.
    pub fn offset(&self, pos: Pos) -> usize {
        pos.0.saturating_sub(self.base).min(self.size) as usize
    }

    /// Whether `pos` falls within this file (EOF included).
    pub fn contains(&self, pos: Pos) -> bool {
        pos.0 >= self.base && pos.0 <= self.base + self.size
    }

    pub fn position(&self, pos: Pos) -> Position {
        if !pos.is_valid() || !self.contains(pos) {
            return Position {
                filename: self.name.clone(),
                ..Position::default()
            };
        }
        let offset = self.offset(pos);
        let (line, column) = self.lines.offset_to_line_col(offset);
        Position {
            filename: self.name.clone(),
            offset,
            line,
            column,
        }
    }

    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        self.lines.line_text(source, line)
    }
}

/// The set of source files known to one compilation session.
#[derive(Debug, Clone)]
pub struct FileSet {
    base: u32,
    files: Vec<Arc<SourceFile>>,
}

impl Default for FileSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSet {
    pub fn new() -> Self {
        // Base 0 is reserved for Pos::NONE.
        FileSet {
            base: 1,
            files: Vec::new(),
        }
    }

    /// Register a new file. Each file reserves `size + 1` positions so the
    /// EOF position of one file never collides with the first of the next.
    pub fn add_file(&mut self, name: impl Into<String>, source: &str) -> Result<Arc<SourceFile>, SourceError> {
        let file = SourceFile::new(name, self.base, source)?;
        let next = self
            .base
            .checked_add(file.size)
            .and_then(|end| end.checked_add(1))
            .ok_or_else(|| SourceError::Exhausted {
                name: file.name.clone(),
            })?;
        self.base = next;
        let file = Arc::new(file);
        self.files.push(Arc::clone(&file));
        Ok(file)
    }

    /// The file containing `pos`, if any.
    pub fn file(&self, pos: Pos) -> Option<&Arc<SourceFile>> {
        if !pos.is_valid() {
            return None;
        }
        let idx = self.files.partition_point(|f| f.base <= pos.0);
        let file = self.files.get(idx.checked_sub(1)?)?;
        file.contains(pos).then_some(file)
    }

    pub fn position(&self, pos: Pos) -> Position {
        self.file(pos)
            .map(|f| f.position(pos))
            .unwrap_or_default()
    }

    pub fn files(&self) -> impl Iterator<Item = &Arc<SourceFile>> {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bases_do_not_overlap() {
        let mut fset = FileSet::new();
        let a = fset.add_file("a.rose", "var x int\n").unwrap();
        let b = fset.add_file("b.rose", "let y = 1").unwrap();
        assert_eq!(a.base(), 1);
        assert_eq!(b.base(), 1 + 10 + 1);
        // EOF of a is still inside a
        assert!(a.contains(a.pos(10)));
        assert!(!b.contains(a.pos(10)));
        assert_eq!(fset.file(b.pos(0)).map(|f| f.name()), Some("b.rose"));
        assert_eq!(fset.file(a.pos(10)).map(|f| f.name()), Some("a.rose"));
    }

    #[test]
    fn position_display() {
        let mut fset = FileSet::new();
        let f = fset.add_file("main.rose", "var a\nvar b").unwrap();
        let p = fset.position(f.pos(10));
        assert_eq!(p.line, 2);
        assert_eq!(p.column, 5);
        assert_eq!(p.to_string(), "main.rose:2:5");

        let anon = SourceFile::new("", 1, "x").unwrap();
        assert_eq!(anon.position(anon.pos(0)).to_string(), "1:1");
        assert_eq!(Position::default().to_string(), "-");
    }

    #[test]
    fn invalid_positions() {
        let fset = FileSet::new();
        assert!(fset.file(Pos::NONE).is_none());
        assert!(!fset.position(Pos(42)).is_valid());
    }

    #[test]
    fn offsets_clamp_to_eof() {
        let f = SourceFile::new("x", 5, "abc").unwrap();
        assert_eq!(f.pos(100), Pos(8));
        assert_eq!(f.offset(Pos(7)), 2);
        assert_eq!(f.offset(Pos(1)), 0);
    }

    #[test]
    fn file_past_position_space_is_rejected() {
        let err = SourceFile::new("big.rose", u32::MAX - 2, "abcd").unwrap_err();
        assert_eq!(
            err,
            SourceError::Exhausted {
                name: "big.rose".into()
            }
        );
        // EOF at exactly u32::MAX still fits
        let edge = SourceFile::new("edge.rose", u32::MAX - 4, "abcd").unwrap();
        assert_eq!(edge.pos(4), Pos(u32::MAX));
    }

    #[test]
    fn full_file_set_refuses_more_files() {
        let mut fset = FileSet::new();
        fset.base = u32::MAX - 3;
        let last = fset.add_file("last.rose", "ab");
        assert!(last.is_ok());
        let err = fset.add_file("more.rose", "").unwrap_err();
        assert_eq!(err.to_string(), "more.rose: no positions left in the file set");
        assert_eq!(fset.files().count(), 1);
    }
}
