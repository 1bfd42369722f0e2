// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

use std::fmt;
use std::ops::Add;

/// A compact position in a [`FileSet`](crate::FileSet).
///
/// A position is `base + offset` of some source file. Positions are only
/// ordered meaningfully within one file; use [`SourceFile::position`] to turn
/// one into a line and column.
///
/// [`SourceFile::position`]: crate::SourceFile::position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos(pub u32);

impl Pos {
    /// The zero value: no position information.
    pub const NONE: Pos = Pos(0);

    pub fn is_valid(self) -> bool {
        self != Pos::NONE
    }
}

/// Saturates at `u32::MAX`. Positions handed out by a [`FileSet`](crate::FileSet)
/// never come near it.
impl Add<usize> for Pos {
    type Output = Pos;

    fn add(self, rhs: usize) -> Pos {
        let rhs = u32::try_from(rhs).unwrap_or(u32::MAX);
        Pos(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A half-open range of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.0.saturating_sub(self.start.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Precomputed line-start offsets for O(log n) byte-offset → line:col lookup.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the start of each line. line_starts[0] is always 0.
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map by scanning source for newlines. O(n).
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        LineMap { line_starts }
    }

    /// Convert byte offset to (line, col), both 1-based. O(log n).
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset as u32;
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line = (line_idx + 1) as u32;
        let col = offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Get the source text of a 1-based line number. O(1).
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| (s as usize).saturating_sub(1)) // exclude the \n
            .unwrap_or(source.len());
        source.get(start..end)
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source() {
        let lm = LineMap::new("");
        assert_eq!(lm.offset_to_line_col(0), (1, 1));
        assert_eq!(lm.line_count(), 1);
    }

    #[test]
    fn multi_line() {
        let src = "var a\nconst b = 1\nlet c = 2";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 3);
        assert_eq!(lm.offset_to_line_col(0), (1, 1));
        assert_eq!(lm.offset_to_line_col(4), (1, 5)); // 'a'
        assert_eq!(lm.offset_to_line_col(6), (2, 1)); // 'c' of const
        assert_eq!(lm.offset_to_line_col(18), (3, 1)); // 'l'
        assert_eq!(lm.line_text(src, 2), Some("const b = 1"));
        assert_eq!(lm.line_text(src, 4), None);
    }

    #[test]
    fn offset_at_newline() {
        let src = "ab\ncd\n";
        let lm = LineMap::new(src);
        // The '\n' itself belongs to the line it ends
        assert_eq!(lm.offset_to_line_col(2), (1, 3));
        assert_eq!(lm.offset_to_line_col(3), (2, 1));
        assert_eq!(lm.line_text(src, 3), Some(""));
    }

    #[test]
    fn pos_arithmetic() {
        let p = Pos(10) + 3;
        assert_eq!(p, Pos(13));
        assert!(p.is_valid());
        assert!(!Pos::NONE.is_valid());
        assert_eq!(Span::new(Pos(10), Pos(13)).len(), 3);
        assert_eq!(Pos(u32::MAX - 1) + 5, Pos(u32::MAX));
        assert_eq!(Pos(1) + usize::MAX, Pos(u32::MAX));
    }
}
