//! Lifted source fragments
//!
//! A `Fragment` is an opaque, immutable piece of generated source. The two
//! kinds are deliberately disjoint: an identifier or type-name token is
//! assumed already syntactically valid and is never re-escaped, while an
//! expression fragment is arbitrary generated code. Keeping them apart
//! prevents the lifter from quoting a type name as a string literal or
//! splicing an expression where an identifier is required.

use std::fmt;

/// One piece of generated source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Identifier or type-name token, never re-escaped
    Ident(String),

    /// Generated expression text
    Expr(String),
}

impl Fragment {
    /// Create an identifier/type-name token
    pub fn ident(text: String) -> Self {
        Fragment::Ident(text)
    }

    /// Create an expression fragment
    pub fn expr(text: String) -> Self {
        Fragment::Expr(text)
    }

    /// The generated text
    pub fn code(&self) -> &str {
        match self {
            Fragment::Ident(text) | Fragment::Expr(text) => text,
        }
    }

    /// Consume the fragment, returning the generated text
    pub fn into_code(self) -> String {
        match self {
            Fragment::Ident(text) | Fragment::Expr(text) => text,
        }
    }

    /// Whether this is an identifier/type-name token
    pub fn is_ident(&self) -> bool {
        matches!(self, Fragment::Ident(_))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_stay_disjoint() {
        let ident = Fragment::ident("com.acme.Click".to_string());
        let expr = Fragment::expr("Seq(1, 2)".to_string());

        assert!(ident.is_ident());
        assert!(!expr.is_ident());
        assert_ne!(ident, Fragment::expr("com.acme.Click".to_string()));
    }

    #[test]
    fn test_display_is_the_code() {
        let expr = Fragment::expr("Some(5)".to_string());
        assert_eq!(expr.to_string(), "Some(5)");
        assert_eq!(expr.code(), "Some(5)");
        assert_eq!(expr.into_code(), "Some(5)");
    }
}
