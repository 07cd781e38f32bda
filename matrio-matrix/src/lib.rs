//! Matrio Matrix - Linear algebra operations
//!
//! Provides the calculator's matrix operations:
//! - Properties (det, trace, rank, charpoly)
//! - Basic operations (transpose, inv, add, subtract, multiply, scale)
//! - Decompositions (lu, qr, eigs)
//! - Linear solver (solve)
//! - Display formatting (format)
//!
//! Every operation classifies its input: all-numeric matrices are delegated
//! to nalgebra, matrices with symbolic entries run through the hand-written
//! Laplace expansion engine in [`laplace`]. Operations without a symbolic
//! implementation refuse symbolic input explicitly.

mod decompose;
mod helpers;
pub mod laplace;
mod ops;
mod props;
mod solve;
mod types;

pub use helpers::extract_term_matrix;
pub use types::{ExprMatrix, MatrixClass, TermMatrix, MAX_SYMBOLIC_DIM};

use matrio_plugin::PluginRegistry;

/// Load matrix operations into registry
pub fn load_matrix_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Properties (4 operations)
        .with_function(props::DeterminantFn)
        .with_function(props::TraceFn)
        .with_function(props::RankFn)
        .with_function(props::CharPolyFn)
        // Basic operations (7 operations)
        .with_function(ops::TransposeFn)
        .with_function(ops::InverseFn)
        .with_function(ops::MatAddFn)
        .with_function(ops::MatSubFn)
        .with_function(ops::MatmulFn)
        .with_function(ops::ScaleFn)
        .with_function(ops::FormatFn)
        // Decompositions (3 operations)
        .with_function(decompose::LuFn)
        .with_function(decompose::QrFn)
        .with_function(decompose::EigenFn)
        // Solving (1 operation)
        .with_function(solve::SolveFn)
}
