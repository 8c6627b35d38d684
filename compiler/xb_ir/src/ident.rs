//! Case-folded identifier.
//!
//! xBase identifiers are case-insensitive: `total`, `Total` and `TOTAL` name the
//! same variable, field or class. `Ident` folds its text to upper case once, at
//! construction, so equality and hashing are plain string operations afterwards.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identifier with case-insensitive identity.
///
/// Cloning is a reference-count bump; the folded text is shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident(Arc<str>);

impl Ident {
    /// Create an identifier, folding `text` to upper case.
    pub fn new(text: &str) -> Self {
        if text.bytes().any(|b| b.is_ascii_lowercase()) || !text.is_ascii() {
            Ident(Arc::from(text.to_uppercase()))
        } else {
            Ident(Arc::from(text))
        }
    }

    /// The folded text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `text` names this identifier, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        if text.is_ascii() {
            self.0.eq_ignore_ascii_case(text)
        } else {
            *self.0 == *text.to_uppercase()
        }
    }
}

impl From<&str> for Ident {
    fn from(text: &str) -> Self {
        Ident::new(text)
    }
}

impl From<&String> for Ident {
    fn from(text: &String) -> Self {
        Ident::new(text)
    }
}

impl From<String> for Ident {
    fn from(text: String) -> Self {
        Ident::new(&text)
    }
}

impl From<&Ident> for Ident {
    fn from(ident: &Ident) -> Self {
        ident.clone()
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Ident {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ident({})", self.0)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
