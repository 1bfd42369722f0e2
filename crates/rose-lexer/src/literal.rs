// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scanners for numeric, character and string literals.
//!
//! Each scanner is entered with the opening character already consumed and
//! always produces a token, reporting malformed input through the lexer's
//! error list.

use rose_ast::token::TokenKind;

use crate::lexer::Lexer;

impl<'a> Lexer<'a> {
    /// Number starting with the digit `first`.
    pub(crate) fn scan_number(&mut self, start: usize, first: char) -> TokenKind {
        if first == '0' {
            let prefix = self
                .cursor
                .eat_if(|c| matches!(c, 'x' | 'X' | 'o' | 'O' | 'b' | 'B'));
            if let Some(prefix) = prefix {
                let (radix, name) = match prefix.to_ascii_lowercase() {
                    'x' => (16, "hexadecimal"),
                    'o' => (8, "octal"),
                    _ => (2, "binary"),
                };
                let (count, invalid) = self.scan_digits(radix);
                if count == 0 {
                    self.error(start, format!("{name} literal has no digits"));
                } else if let Some(digit) = invalid {
                    self.error(start, format!("invalid digit '{digit}' in {name} literal"));
                }
                return TokenKind::Int;
            }
        }

        let (_, invalid) = self.scan_digits(if first == '0' { 8 } else { 10 });
        let mut kind = TokenKind::Int;
        if self.cursor.eat('.') {
            self.scan_digits(10);
            kind = TokenKind::Float;
        }
        if self.scan_exponent(start) {
            kind = TokenKind::Float;
        }
        if kind == TokenKind::Int {
            // A leading zero makes an integer octal.
            if let Some(digit) = invalid {
                self.error(start, format!("invalid digit '{digit}' in octal literal"));
            }
        }
        kind
    }

    /// Float starting with `.`, the dot already consumed.
    pub(crate) fn scan_fraction(&mut self, start: usize) -> TokenKind {
        self.scan_digits(10);
        self.scan_exponent(start);
        TokenKind::Float
    }

    /// Consumes digits and `_` separators. Returns the number of digits and
    /// the first decimal digit not valid in `radix`.
    fn scan_digits(&mut self, radix: u32) -> (usize, Option<char>) {
        let scan_radix = radix.max(10);
        let mut count = 0;
        let mut invalid = None;
        while let Some(ch) = self.cursor.eat_if(|c| c == '_' || c.is_digit(scan_radix)) {
            if ch == '_' {
                continue;
            }
            count += 1;
            if invalid.is_none() && !ch.is_digit(radix) {
                invalid = Some(ch);
            }
        }
        (count, invalid)
    }

    fn scan_exponent(&mut self, start: usize) -> bool {
        if self.cursor.eat_if(|c| c == 'e' || c == 'E').is_none() {
            return false;
        }
        self.cursor.eat_if(|c| c == '+' || c == '-');
        let (count, _) = self.scan_digits(10);
        if count == 0 {
            self.error(start, "exponent has no digits");
        }
        true
    }

    /// Character literal, the opening `'` already consumed.
    pub(crate) fn scan_char(&mut self, start: usize) -> TokenKind {
        let (count, terminated) = self.scan_quoted(start, '\'');
        if terminated && count != 1 {
            self.error(start, "invalid char literal");
        }
        TokenKind::Char
    }

    /// Interpreted string literal, the opening `"` already consumed.
    pub(crate) fn scan_string(&mut self, start: usize) -> TokenKind {
        self.scan_quoted(start, '"');
        TokenKind::String
    }

    /// Raw string literal, the opening backquote already consumed. May span
    /// lines; no escapes.
    pub(crate) fn scan_raw_string(&mut self, start: usize) -> TokenKind {
        loop {
            match self.cursor.bump() {
                Some('`') => break,
                Some(_) => {}
                None => {
                    self.error(start, "literal not terminated");
                    break;
                }
            }
        }
        TokenKind::RawString
    }

    /// Scans up to and including the closing `quote`. Returns the number of
    /// characters in the literal and whether the closing quote was found.
    fn scan_quoted(&mut self, start: usize, quote: char) -> (usize, bool) {
        let mut count = 0;
        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    self.error(start, "literal not terminated");
                    return (count, false);
                }
                Some(ch) if ch == quote => {
                    self.cursor.bump();
                    return (count, true);
                }
                Some('\\') => {
                    let escape_start = self.cursor.offset();
                    self.cursor.bump();
                    self.scan_escape(escape_start);
                }
                Some(_) => {
                    self.cursor.bump();
                }
            }
            count += 1;
        }
    }

    /// Escape sequence, the backslash already consumed.
    fn scan_escape(&mut self, start: usize) {
        match self.cursor.peek() {
            None => self.error(start, "escape sequence not terminated"),
            Some('a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\' | '\'' | '"') => {
                self.cursor.bump();
            }
            Some('0'..='7') => self.scan_escape_digits(start, 8, 3),
            Some('x') => {
                self.cursor.bump();
                self.scan_escape_digits(start, 16, 2);
            }
            Some('u') => {
                self.cursor.bump();
                self.scan_escape_digits(start, 16, 4);
            }
            Some('U') => {
                self.cursor.bump();
                self.scan_escape_digits(start, 16, 8);
            }
            Some(ch) => {
                // Leave a newline for the enclosing literal to report.
                if ch != '\n' {
                    self.cursor.bump();
                }
                self.error(start, "invalid char escape");
            }
        }
    }

    fn scan_escape_digits(&mut self, start: usize, radix: u32, n: usize) {
        for _ in 0..n {
            match self.cursor.peek() {
                Some(ch) if ch.is_digit(radix) => {
                    self.cursor.bump();
                }
                None => {
                    self.error(start, "escape sequence not terminated");
                    return;
                }
                Some(_) => {
                    self.error(start, "invalid char escape");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Lexer;
    use rose_ast::token::TokenKind;

    fn lex_one(src: &str) -> (TokenKind, String, Vec<String>) {
        let mut lexer = Lexer::new(src, 1);
        let tok = lexer.next_token();
        let errors = lexer.take_errors().into_iter().map(|e| e.message).collect();
        (tok.kind, tok.lit.to_string(), errors)
    }

    #[test]
    fn integers() {
        assert_eq!(lex_one("1_000").0, TokenKind::Int);
        assert_eq!(lex_one("0x1F").1, "0x1F");
        assert_eq!(lex_one("0b1010").2, Vec::<String>::new());
        assert_eq!(lex_one("0o17").0, TokenKind::Int);
        assert_eq!(lex_one("0").0, TokenKind::Int);
    }

    #[test]
    fn integer_errors() {
        assert_eq!(lex_one("0x").2, vec!["hexadecimal literal has no digits"]);
        assert_eq!(lex_one("0b102").2, vec!["invalid digit '2' in binary literal"]);
        assert_eq!(lex_one("0o8").2, vec!["invalid digit '8' in octal literal"]);
        assert_eq!(lex_one("09").2, vec!["invalid digit '9' in octal literal"]);
    }

    #[test]
    fn floats() {
        assert_eq!(lex_one("3.14"), (TokenKind::Float, "3.14".into(), vec![]));
        assert_eq!(lex_one(".5").0, TokenKind::Float);
        assert_eq!(lex_one("1e10").0, TokenKind::Float);
        assert_eq!(lex_one("2.5E-3").1, "2.5E-3");
        // A leading zero is fine once the literal is a float
        assert_eq!(lex_one("09.5").2, Vec::<String>::new());
        assert_eq!(lex_one("1e").2, vec!["exponent has no digits"]);
    }

    #[test]
    fn chars() {
        assert_eq!(lex_one("'a'"), (TokenKind::Char, "'a'".into(), vec![]));
        assert_eq!(lex_one(r"'\n'").2, Vec::<String>::new());
        assert_eq!(lex_one(r"'\x41'").2, Vec::<String>::new());
        assert_eq!(lex_one(r"'é'").2, Vec::<String>::new());
        assert_eq!(lex_one(r"'\101'").2, Vec::<String>::new());
        assert_eq!(lex_one("'ab'").2, vec!["invalid char literal"]);
        assert_eq!(lex_one("''").2, vec!["invalid char literal"]);
        assert_eq!(lex_one(r"'\q'").2, vec!["invalid char escape"]);
        assert_eq!(lex_one("'a").2, vec!["literal not terminated"]);
    }

    #[test]
    fn strings() {
        assert_eq!(
            lex_one(r#""hi\t\"there\"""#),
            (TokenKind::String, r#""hi\t\"there\"""#.into(), vec![])
        );
        assert_eq!(lex_one("\"abc\ndef\"").2, vec!["literal not terminated"]);
        assert_eq!(lex_one(r#""\x4""#).2, vec!["invalid char escape"]);
        assert_eq!(lex_one("\"\\").2, vec!["escape sequence not terminated", "literal not terminated"]);
    }

    #[test]
    fn raw_strings() {
        let (kind, lit, errors) = lex_one("`a\\n\nb`");
        assert_eq!(kind, TokenKind::RawString);
        assert_eq!(lit, "`a\\n\nb`");
        assert!(errors.is_empty());
        assert_eq!(lex_one("`open").2, vec!["literal not terminated"]);
    }
}
