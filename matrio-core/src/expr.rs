//! Expression trees produced by the symbolic evaluator
//!
//! The engine never simplifies: `x - x` stays `x - x`, `1*0` stays `1*0`.
//! Equality is structural, which for these trees is the same as
//! render-identical (the render pass is deterministic).

use crate::Term;
use serde::{Deserialize, Serialize};

/// Binary operator inside an expression tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
}

impl BinOp {
    pub fn glyph(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
        }
    }
}

/// Composite algebraic expression built from caller-supplied terms.
///
/// `Neg` carries the leading negation of an odd-parity cofactor; it is the
/// only place a unary sign occurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "node", content = "value")]
pub enum Expr {
    Literal(String),
    Symbol(String),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Neg(Box<Expr>),
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn add(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Sub, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Mul, left, right)
    }

    pub fn neg(inner: Expr) -> Expr {
        Expr::Neg(Box::new(inner))
    }

    /// Literal and symbol leaves; everything else is composite.
    pub fn is_atom(&self) -> bool {
        matches!(self, Expr::Literal(_) | Expr::Symbol(_))
    }
}

impl From<Term> for Expr {
    fn from(t: Term) -> Expr {
        match t {
            Term::Literal(s) => Expr::Literal(s),
            Term::Symbol(s) => Expr::Symbol(s),
        }
    }
}

impl From<&Term> for Expr {
    fn from(t: &Term) -> Expr {
        t.clone().into()
    }
}
