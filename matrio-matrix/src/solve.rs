//! Linear system solver (numeric path only)

use crate::helpers::{check_square, extract_term_matrix, extract_term_vector};
use crate::types::MatrixClass;
use matrio_core::{CalcError, Term, Value};
use matrio_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};
use nalgebra::DMatrix;

// ============================================================================
// SOLVE - Solve linear system Ax = b
// ============================================================================

pub struct SolveFn;

static SOLVE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("A", "Matrix", "Square numeric coefficient matrix"),
    ArgMeta::required("b", "Vector", "Numeric right-hand side"),
];
static SOLVE_EXAMPLES: [&str; 1] = ["solve([[2, 1], [1, 3]], [5, 5]) → [2, 1]"];
static SOLVE_RELATED: [&str; 2] = ["lu", "inv"];

impl FunctionPlugin for SolveFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "solve",
            description: "Solve Ax = b by LU decomposition (numeric only)",
            usage: "solve(A, b)",
            args: &SOLVE_ARGS,
            returns: "List",
            examples: &SOLVE_EXAMPLES,
            category: "matrix",
            related: &SOLVE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 2 {
            return Value::Error(CalcError::arg_count("solve", 2, args.len()));
        }

        let a = match extract_term_matrix(&args[0], "solve", "A") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let b = match extract_term_vector(&args[1], "solve", "b") {
            Ok(v) => v,
            Err(e) => return Value::Error(e),
        };

        if let Err(e) = check_square(&a, "solve") {
            return Value::Error(e);
        }
        if b.len() != a.rows() {
            return Value::Error(CalcError::domain_error(format!(
                "solve: b has {} entries, expected {}",
                b.len(),
                a.rows()
            )));
        }
        // The legacy solver demanded all-numeric input; a symbol anywhere is
        // an explicit refusal, not a degraded answer.
        if a.classify() == MatrixClass::Symbolic || !b.iter().all(Term::is_literal) {
            return Value::Error(CalcError::unsupported_symbolic("solve"));
        }

        let a_float = match a.to_dmatrix() {
            Ok(dm) => dm,
            Err(e) => return Value::Error(e),
        };
        let b_float: Vec<f64> = b.iter().filter_map(Term::to_f64).collect();
        let b_mat = DMatrix::from_column_slice(b_float.len(), 1, &b_float);

        match a_float.lu().solve(&b_mat) {
            Some(x) => Value::List(x.iter().map(|&v| Value::Number(v)).collect()),
            None => Value::Error(CalcError::domain_error(
                "solve: system is singular or nearly singular",
            )),
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

    fn vector_value(cells: &[&str]) -> Value {
        Value::List(cells.iter().map(|t| Value::Text(t.to_string())).collect())
    }

    #[test]
    fn test_solve_numeric() {
        let x = SolveFn.call(
            &[
                matrix_value(&[&["2", "1"], &["1", "3"]]),
                vector_value(&["5", "5"]),
            ],
            &ctx(),
        );
        let xs = x.as_list().unwrap();
        assert!((xs[0].as_number().unwrap() - 2.0).abs() < 1e-10);
        assert!((xs[1].as_number().unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_solve_symbolic_refused() {
        let x = SolveFn.call(
            &[
                matrix_value(&[&["x", "1"], &["1", "3"]]),
                vector_value(&["5", "5"]),
            ],
            &ctx(),
        );
        assert_eq!(x.as_error().unwrap().code, codes::UNSUPPORTED_SYMBOLIC);

        let x = SolveFn.call(
            &[
                matrix_value(&[&["2", "1"], &["1", "3"]]),
                vector_value(&["5", "y"]),
            ],
            &ctx(),
        );
        assert_eq!(x.as_error().unwrap().code, codes::UNSUPPORTED_SYMBOLIC);
    }

    #[test]
    fn test_solve_singular() {
        let x = SolveFn.call(
            &[
                matrix_value(&[&["1", "2"], &["2", "4"]]),
                vector_value(&["1", "2"]),
            ],
            &ctx(),
        );
        assert_eq!(x.as_error().unwrap().code, codes::DOMAIN_ERROR);
    }

    #[test]
    fn test_solve_dimension_mismatch() {
        let x = SolveFn.call(
            &[
                matrix_value(&[&["1", "0"], &["0", "1"]]),
                vector_value(&["1", "2", "3"]),
            ],
            &ctx(),
        );
        assert_eq!(x.as_error().unwrap().code, codes::DOMAIN_ERROR);
    }
}
