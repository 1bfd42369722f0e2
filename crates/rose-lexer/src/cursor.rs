// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Character cursor over the source text.
//!
//! The cursor only ever looks at the next unconsumed character. Every
//! multi-character token is recognized by consuming one character and
//! peeking at the one after it.

pub(crate) struct Cursor<'a> {
    src: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Cursor { src, offset: 0 }
    }

    /// Byte offset of the next unconsumed character.
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.src[self.offset..].chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        Some(ch)
    }

    /// Consume the next character if it equals `ch`.
    pub(crate) fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.offset += ch.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume the next character if it satisfies `pred`.
    pub(crate) fn eat_if(&mut self, pred: impl Fn(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(ch) if pred(ch) => {
                self.offset += ch.len_utf8();
                Some(ch)
            }
            _ => None,
        }
    }

    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.eat_if(&pred).is_some() {}
    }

    /// Source text from `start` up to the current offset.
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.src[start..self.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_and_peek_multibyte() {
        let mut c = Cursor::new("é+");
        assert_eq!(c.peek(), Some('é'));
        assert_eq!(c.bump(), Some('é'));
        assert_eq!(c.offset(), 2);
        assert!(c.eat('+'));
        assert!(c.is_eof());
        assert_eq!(c.bump(), None);
    }

    #[test]
    fn eat_while_stops_at_first_mismatch() {
        let mut c = Cursor::new("abc1 x");
        c.eat_while(char::is_alphabetic);
        assert_eq!(c.slice_from(0), "abc");
        assert_eq!(c.eat_if(|ch| ch.is_ascii_digit()), Some('1'));
        assert!(!c.eat('x'));
    }
}
