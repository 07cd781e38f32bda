//! Matrix property operations: determinant, trace, rank, characteristic polynomial
//!
//! Each operation validates squareness first, then classifies the matrix and
//! routes: all-numeric grids go to nalgebra, anything with a symbol goes to
//! the Laplace engine.

use crate::helpers::{check_square, extract_symbol, extract_term_matrix};
use crate::laplace;
use crate::types::MatrixClass;
use matrio_core::{CalcError, Value};
use matrio_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};

// ============================================================================
// DET - Determinant
// ============================================================================

pub struct DeterminantFn;

static DET_ARGS: [ArgMeta; 1] = [ArgMeta::required("matrix", "Matrix", "Square matrix")];
static DET_EXAMPLES: [&str; 2] = [
    "det([[1, 2], [3, 4]]) → -2",
    "det([[\"x\", \"1\"], [\"0\", \"x\"]]) → (x*x) - (1*0)",
];
static DET_RELATED: [&str; 3] = ["inv", "rank", "charpoly"];

impl FunctionPlugin for DeterminantFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "det",
            description: "Determinant of a square matrix (symbolic matrices expand by cofactors)",
            usage: "det(matrix)",
            args: &DET_ARGS,
            returns: "Number | Expr",
            examples: &DET_EXAMPLES,
            category: "matrix",
            related: &DET_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("det", 1, args.len()));
        }

        let matrix = match extract_term_matrix(&args[0], "det", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        // Shape gate comes before classification or any recursion.
        if let Err(e) = check_square(&matrix, "det") {
            return Value::Error(e);
        }

        match matrix.classify() {
            MatrixClass::Numeric => match matrix.to_dmatrix() {
                Ok(dm) => Value::Number(dm.determinant()),
                Err(e) => Value::Error(e),
            },
            MatrixClass::Symbolic => match laplace::determinant(&matrix.to_exprs()) {
                Ok(expr) => Value::Expr(expr),
                Err(e) => Value::Error(e),
            },
        }
    }
}

// ============================================================================
// TRACE - Sum of diagonal elements
// ============================================================================

pub struct TraceFn;

static TRACE_ARGS: [ArgMeta; 1] = [ArgMeta::required("matrix", "Matrix", "Square matrix")];
static TRACE_EXAMPLES: [&str; 2] = [
    "trace([[1, 2], [3, 4]]) → 5",
    "trace([[\"x\", \"1\"], [\"0\", \"x\"]]) → x+x",
];
static TRACE_RELATED: [&str; 2] = ["det", "charpoly"];

impl FunctionPlugin for TraceFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "trace",
            description: "Trace of a square matrix (symbolic diagonals are joined, not summed)",
            usage: "trace(matrix)",
            args: &TRACE_ARGS,
            returns: "Number | Expr",
            examples: &TRACE_EXAMPLES,
            category: "matrix",
            related: &TRACE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("trace", 1, args.len()));
        }

        let matrix = match extract_term_matrix(&args[0], "trace", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        if let Err(e) = check_square(&matrix, "trace") {
            return Value::Error(e);
        }

        match matrix.classify() {
            MatrixClass::Numeric => match matrix.to_dmatrix() {
                Ok(dm) => Value::Number(dm.trace()),
                Err(e) => Value::Error(e),
            },
            MatrixClass::Symbolic => match laplace::trace(&matrix.to_exprs()) {
                Ok(expr) => Value::Expr(expr),
                Err(e) => Value::Error(e),
            },
        }
    }
}

// ============================================================================
// RANK - Matrix rank (numeric only)
// ============================================================================

pub struct RankFn;

static RANK_ARGS: [ArgMeta; 1] = [ArgMeta::required("matrix", "Matrix", "Matrix to analyze")];
static RANK_EXAMPLES: [&str; 1] = ["rank([[1, 2], [2, 4]]) → 1"];
static RANK_RELATED: [&str; 2] = ["det", "lu"];

impl FunctionPlugin for RankFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "rank",
            description: "Rank of a numeric matrix via SVD",
            usage: "rank(matrix)",
            args: &RANK_ARGS,
            returns: "Number",
            examples: &RANK_EXAMPLES,
            category: "matrix",
            related: &RANK_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("rank", 1, args.len()));
        }

        let matrix = match extract_term_matrix(&args[0], "rank", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        if matrix.classify() == MatrixClass::Symbolic {
            return Value::Error(CalcError::unsupported_symbolic("rank"));
        }

        let dm = match matrix.to_dmatrix() {
            Ok(dm) => dm,
            Err(e) => return Value::Error(e),
        };
        let svd = dm.svd(false, false);

        let eps = 1e-10;
        let rank = svd.singular_values.iter().filter(|&&s| s.abs() > eps).count();
        Value::Number(rank as f64)
    }
}

// ============================================================================
// CHARPOLY - Characteristic polynomial det(A - λI)
// ============================================================================

pub struct CharPolyFn;

static CHARPOLY_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("matrix", "Matrix", "Square matrix"),
    ArgMeta::optional("symbol", "Symbol", "Eigenvalue variable name", "λ"),
];
static CHARPOLY_EXAMPLES: [&str; 1] =
    ["charpoly([[\"a\", \"b\"], [\"c\", \"d\"]], \"λ\") → ((a-λ)*(d-λ)) - (b*c)"];
static CHARPOLY_RELATED: [&str; 2] = ["det", "eigs"];

impl FunctionPlugin for CharPolyFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "charpoly",
            description: "Characteristic polynomial det(A - λI), always symbolic",
            usage: "charpoly(matrix, [symbol])",
            args: &CHARPOLY_ARGS,
            returns: "Expr",
            examples: &CHARPOLY_EXAMPLES,
            category: "matrix",
            related: &CHARPOLY_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() || args.len() > 2 {
            return Value::Error(CalcError::arg_count("charpoly", 2, args.len()));
        }

        let matrix = match extract_term_matrix(&args[0], "charpoly", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        if let Err(e) = check_square(&matrix, "charpoly") {
            return Value::Error(e);
        }

        let symbol = match args.get(1) {
            Some(v) => match extract_symbol(v, "charpoly", "symbol") {
                Ok(s) => s,
                Err(e) => return Value::Error(e),
            },
            None => "λ".to_string(),
        };

        // Subtracting the symbol makes the derived matrix symbolic whatever
        // the input was, so this always runs the Laplace engine.
        match laplace::char_poly(&matrix, &symbol) {
            Ok(expr) => Value::Expr(expr),
            Err(e) => Value::Error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrio_core::codes;
    use matrio_plugin::PluginRegistry;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn matrix_value(rows: &[&[&str]]) -> Value {
        Value::List(
            rows.iter()
                .map(|row| Value::List(row.iter().map(|t| Value::Text(t.to_string())).collect()))
                .collect(),
        )
    }

    #[test]
    fn test_det_numeric() {
        let det = DeterminantFn.call(&[matrix_value(&[&["1", "2"], &["3", "4"]])], &ctx());
        let value = det.as_number().expect("numeric det");
        assert!((value - (-2.0)).abs() < 1e-10);
    }

    #[test]
    fn test_det_symbolic() {
        let det = DeterminantFn.call(&[matrix_value(&[&["x", "1"], &["0", "x"]])], &ctx());
        let expr = det.as_expr().expect("symbolic det");
        assert_eq!(expr.render(), "(x*x) - (1*0)");
    }

    #[test]
    fn test_det_rejects_non_square_before_expansion() {
        let det = DeterminantFn.call(
            &[matrix_value(&[&["x", "1", "2"], &["0", "x", "3"]])],
            &ctx(),
        );
        assert_eq!(det.as_error().unwrap().code, codes::NON_SQUARE);
    }

    #[test]
    fn test_det_arg_count() {
        let det = DeterminantFn.call(&[], &ctx());
        assert_eq!(det.as_error().unwrap().code, codes::ARG_COUNT);
    }

    #[test]
    fn test_trace_numeric() {
        let tr = TraceFn.call(&[matrix_value(&[&["1", "2"], &["3", "4"]])], &ctx());
        assert_eq!(tr.as_number(), Some(5.0));
    }

    #[test]
    fn test_trace_symbolic_no_simplification() {
        let tr = TraceFn.call(&[matrix_value(&[&["x", "1"], &["0", "x"]])], &ctx());
        assert_eq!(tr.as_expr().unwrap().render(), "x+x");
    }

    #[test]
    fn test_rank_numeric() {
        let rank = RankFn.call(&[matrix_value(&[&["1", "2"], &["2", "4"]])], &ctx());
        assert_eq!(rank.as_number(), Some(1.0));
    }

    #[test]
    fn test_rank_symbolic_unsupported() {
        let rank = RankFn.call(&[matrix_value(&[&["x", "2"], &["2", "4"]])], &ctx());
        assert_eq!(rank.as_error().unwrap().code, codes::UNSUPPORTED_SYMBOLIC);
    }

    #[test]
    fn test_charpoly_default_symbol() {
        let poly = CharPolyFn.call(&[matrix_value(&[&["a", "b"], &["c", "d"]])], &ctx());
        assert_eq!(poly.as_expr().unwrap().render(), "((a-λ)*(d-λ)) - (b*c)");
    }

    #[test]
    fn test_charpoly_explicit_symbol() {
        let poly = CharPolyFn.call(
            &[
                matrix_value(&[&["a", "b"], &["c", "d"]]),
                Value::Text("t".to_string()),
            ],
            &ctx(),
        );
        assert_eq!(poly.as_expr().unwrap().render(), "((a-t)*(d-t)) - (b*c)");
    }

    #[test]
    fn test_charpoly_rejects_non_square() {
        let poly = CharPolyFn.call(&[matrix_value(&[&["a", "b", "c"], &["d", "e", "f"]])], &ctx());
        assert_eq!(poly.as_error().unwrap().code, codes::NON_SQUARE);
    }

    #[test]
    fn test_charpoly_numeric_matrix_accepted() {
        let poly = CharPolyFn.call(&[matrix_value(&[&["1", "2"], &["3", "4"]])], &ctx());
        assert_eq!(poly.as_expr().unwrap().render(), "((1-λ)*(4-λ)) - (2*3)");
    }

    #[test]
    fn test_charpoly_rejects_numeric_symbol() {
        let poly = CharPolyFn.call(
            &[
                matrix_value(&[&["a", "b"], &["c", "d"]]),
                Value::Text("3".to_string()),
            ],
            &ctx(),
        );
        assert_eq!(poly.as_error().unwrap().code, codes::ARG_TYPE);
    }
}
