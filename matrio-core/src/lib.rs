//! Matrio Core - Fundamental types
//!
//! This crate provides the core types used throughout Matrio:
//! - `Term`: atomic grid token (numeric literal or symbol)
//! - `Expr`: expression tree built by the symbolic evaluator
//! - `Value`: runtime values (numbers, expressions, objects, errors)
//! - `CalcError`: structured errors surfaced to the display layer

mod error;
mod expr;
mod render;
mod term;
mod value;

pub use error::{codes, CalcError, ErrorContext, Severity};
pub use expr::{BinOp, Expr};
pub use render::{format_number, RenderOptions};
pub use term::{is_finite_real, Term, TermError};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{BinOp, CalcError, Expr, RenderOptions, Severity, Term, Value};
}
