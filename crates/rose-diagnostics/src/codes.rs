// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps error codes (E0001, E0100, E0200) to titles and categories.
//! Used for error display and the JSON report.

use std::collections::HashMap;

/// Code for lexical errors: illegal characters and malformed literals.
pub const LEXICAL: &str = "E0001";
/// Code for syntax errors: unexpected or missing tokens.
pub const SYNTAX: &str = "E0100";
/// Code for declaration errors found while parsing.
pub const SEMANTIC: &str = "E0200";

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Declaration,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "Lexical"),
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Declaration => write!(f, "Declaration"),
        }
    }
}

macro_rules! register_codes {
    ($($code:expr => ($title:literal, $cat:expr)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                LEXICAL => ("malformed token", Lexical),
                SYNTAX => ("unexpected token", Syntax),
                SEMANTIC => ("invalid declaration", Declaration),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        let registry = ErrorCodeRegistry::default();
        assert_eq!(registry.all().count(), 3);
        let info = registry.get("E0100").unwrap();
        assert_eq!(info.title, "unexpected token");
        assert_eq!(info.category, ErrorCategory::Syntax);
        assert_eq!(registry.get(SEMANTIC).map(|i| i.category.to_string()), Some("Declaration".into()));
        assert!(registry.get("E9999").is_none());
    }
}
