//! Atomic expression tokens
//!
//! A `Term` is the opaque unit the caller types into one grid cell: either a
//! numeric literal or a symbol name. Terms are never rewritten after
//! construction; a literal keeps its original spelling ("1.50" stays "1.50").

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for token parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    #[error("Empty token")]
    Empty,
}

/// True when a token parses as a finite real number.
///
/// This single predicate decides the Numeric/Symbolic split for a whole
/// matrix: one token failing it forces the symbolic path.
pub fn is_finite_real(token: &str) -> bool {
    token.trim().parse::<f64>().map_or(false, f64::is_finite)
}

/// Immutable atomic token, value-equal by kind and text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text")]
pub enum Term {
    /// Finite real literal, original spelling preserved
    Literal(String),
    /// Symbol name
    Symbol(String),
}

impl Term {
    /// Classify a raw token. Surrounding whitespace is trimmed; the empty
    /// token is rejected (a grid cell must not be blank).
    pub fn parse(token: &str) -> Result<Self, TermError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TermError::Empty);
        }
        if is_finite_real(token) {
            Ok(Term::Literal(token.to_string()))
        } else {
            Ok(Term::Symbol(token.to_string()))
        }
    }

    /// The token text as supplied (trimmed).
    pub fn text(&self) -> &str {
        match self {
            Term::Literal(s) | Term::Symbol(s) => s,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Numeric value of a literal token. `None` for symbols.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Term::Literal(s) => s.parse::<f64>().ok().filter(|v| v.is_finite()),
            Term::Symbol(_) => None,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}
