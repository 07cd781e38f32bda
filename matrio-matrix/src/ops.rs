//! Matrix operations: transpose, inverse, arithmetic, formatting

use crate::helpers::{
    check_same_dims, check_square, dmatrix_to_value, extract_f64, extract_term_matrix,
};
use crate::laplace;
use crate::types::MatrixClass;
use matrio_core::{CalcError, Value};
use matrio_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};
use std::collections::HashMap;

// ============================================================================
// TRANSPOSE - Pure re-indexing, works for numeric and symbolic alike
// ============================================================================

pub struct TransposeFn;

static TRANSPOSE_ARGS: [ArgMeta; 1] = [ArgMeta::required("matrix", "Matrix", "Matrix to transpose")];
static TRANSPOSE_EXAMPLES: [&str; 1] = ["transpose([[\"a\", \"b\"], [\"c\", \"d\"]]) → [[a, c], [b, d]]"];
static TRANSPOSE_RELATED: [&str; 2] = ["inv", "multiply"];

impl FunctionPlugin for TransposeFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "transpose",
            description: "Matrix transpose (no arithmetic, tokens are re-indexed)",
            usage: "transpose(matrix)",
            args: &TRANSPOSE_ARGS,
            returns: "Matrix",
            examples: &TRANSPOSE_EXAMPLES,
            category: "matrix",
            related: &TRANSPOSE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("transpose", 1, args.len()));
        }

        let matrix = match extract_term_matrix(&args[0], "transpose", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        matrix.transpose().to_value()
    }
}

// ============================================================================
// INV - Inverse
// ============================================================================

pub struct InverseFn;

static INV_ARGS: [ArgMeta; 1] = [ArgMeta::required("matrix", "Matrix", "Square matrix")];
static INV_EXAMPLES: [&str; 2] = [
    "inv([[2, 0], [0, 2]]) → [[0.5, 0], [0, 0.5]]",
    "inv([[\"a\", \"b\"], [\"c\", \"d\"]]) → {determinant, adjugate}",
];
static INV_RELATED: [&str; 2] = ["det", "solve"];

impl FunctionPlugin for InverseFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "inv",
            description: "Matrix inverse; symbolic matrices return determinant and adjugate separately",
            usage: "inv(matrix)",
            args: &INV_ARGS,
            returns: "Matrix | Object",
            examples: &INV_EXAMPLES,
            category: "matrix",
            related: &INV_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("inv", 1, args.len()));
        }

        let matrix = match extract_term_matrix(&args[0], "inv", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        if let Err(e) = check_square(&matrix, "inv") {
            return Value::Error(e);
        }

        match matrix.classify() {
            MatrixClass::Numeric => {
                let dm = match matrix.to_dmatrix() {
                    Ok(dm) => dm,
                    Err(e) => return Value::Error(e),
                };
                match dm.try_inverse() {
                    Some(inv) => dmatrix_to_value(&inv),
                    None => Value::Error(
                        CalcError::domain_error("inv: matrix is singular").in_op("inv"),
                    ),
                }
            }
            MatrixClass::Symbolic => {
                // The complete inverse is adjugate/determinant; the division
                // and the zero test belong to the caller, not the engine.
                match laplace::adjugate(&matrix.to_exprs()) {
                    Ok((det, adj)) => {
                        let mut obj = HashMap::new();
                        obj.insert("determinant".to_string(), Value::Expr(det));
                        obj.insert("adjugate".to_string(), adj.to_value());
                        Value::Object(obj)
                    }
                    Err(e) => Value::Error(e),
                }
            }
        }
    }
}

// ============================================================================
// ADD / SUBTRACT - Elementwise arithmetic (numeric only)
// ============================================================================

macro_rules! elementwise_fn {
    ($name:ident, $op_name:literal, $doc:literal, $apply:expr) => {
        pub struct $name;

        impl FunctionPlugin for $name {
            fn meta(&self) -> FunctionMeta {
                FunctionMeta {
                    name: $op_name,
                    description: $doc,
                    usage: concat!($op_name, "(a, b)"),
                    args: &BINARY_ARGS,
                    returns: "Matrix",
                    examples: &BINARY_EXAMPLES,
                    category: "matrix",
                    related: &BINARY_RELATED,
                }
            }

            fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
                if args.len() != 2 {
                    return Value::Error(CalcError::arg_count($op_name, 2, args.len()));
                }

                let a = match extract_term_matrix(&args[0], $op_name, "a") {
                    Ok(m) => m,
                    Err(e) => return Value::Error(e),
                };
                let b = match extract_term_matrix(&args[1], $op_name, "b") {
                    Ok(m) => m,
                    Err(e) => return Value::Error(e),
                };

                if let Err(e) = check_same_dims(&a, &b, $op_name) {
                    return Value::Error(e);
                }
                if a.classify() == MatrixClass::Symbolic || b.classify() == MatrixClass::Symbolic {
                    return Value::Error(CalcError::unsupported_symbolic($op_name));
                }

                match (a.to_dmatrix(), b.to_dmatrix()) {
                    (Ok(da), Ok(db)) => dmatrix_to_value(&$apply(da, db)),
                    (Err(e), _) | (_, Err(e)) => Value::Error(e),
                }
            }
        }
    };
}

static BINARY_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "First matrix"),
    ArgMeta::required("b", "Matrix", "Second matrix"),
];
static BINARY_EXAMPLES: [&str; 1] = ["add([[1]], [[2]]) → [[3]]"];
static BINARY_RELATED: [&str; 2] = ["multiply", "scale"];

elementwise_fn!(
    MatAddFn,
    "add",
    "Elementwise matrix sum (numeric matrices only)",
    |a, b| &a + &b
);
elementwise_fn!(
    MatSubFn,
    "subtract",
    "Elementwise matrix difference (numeric matrices only)",
    |a, b| &a - &b
);

// ============================================================================
// MULTIPLY - Matrix product (numeric only)
// ============================================================================

pub struct MatmulFn;

static MATMUL_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "First matrix"),
    ArgMeta::required("b", "Matrix", "Second matrix"),
];
static MATMUL_EXAMPLES: [&str; 1] = ["multiply([[1, 2]], [[3], [4]]) → [[11]]"];
static MATMUL_RELATED: [&str; 2] = ["add", "transpose"];

impl FunctionPlugin for MatmulFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "multiply",
            description: "Matrix product (numeric matrices only)",
            usage: "multiply(a, b)",
            args: &MATMUL_ARGS,
            returns: "Matrix",
            examples: &MATMUL_EXAMPLES,
            category: "matrix",
            related: &MATMUL_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 2 {
            return Value::Error(CalcError::arg_count("multiply", 2, args.len()));
        }

        let a = match extract_term_matrix(&args[0], "multiply", "a") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let b = match extract_term_matrix(&args[1], "multiply", "b") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        if a.cols() != b.rows() {
            return Value::Error(CalcError::domain_error(format!(
                "multiply: incompatible dimensions {}×{} and {}×{}",
                a.rows(),
                a.cols(),
                b.rows(),
                b.cols()
            )));
        }
        if a.classify() == MatrixClass::Symbolic || b.classify() == MatrixClass::Symbolic {
            return Value::Error(CalcError::unsupported_symbolic("multiply"));
        }

        match (a.to_dmatrix(), b.to_dmatrix()) {
            (Ok(da), Ok(db)) => dmatrix_to_value(&(&da * &db)),
            (Err(e), _) | (_, Err(e)) => Value::Error(e),
        }
    }
}

// ============================================================================
// SCALE - Scalar multiple (numeric only)
// ============================================================================

pub struct ScaleFn;

static SCALE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("matrix", "Matrix", "Matrix to scale"),
    ArgMeta::required("k", "Number", "Scalar factor"),
];
static SCALE_EXAMPLES: [&str; 1] = ["scale([[1, 2]], 3) → [[3, 6]]"];
static SCALE_RELATED: [&str; 2] = ["add", "multiply"];

impl FunctionPlugin for ScaleFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "scale",
            description: "Scalar multiple of a matrix (numeric matrices only)",
            usage: "scale(matrix, k)",
            args: &SCALE_ARGS,
            returns: "Matrix",
            examples: &SCALE_EXAMPLES,
            category: "matrix",
            related: &SCALE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 2 {
            return Value::Error(CalcError::arg_count("scale", 2, args.len()));
        }

        let matrix = match extract_term_matrix(&args[0], "scale", "matrix") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let k = match extract_f64(&args[1], "scale", "k") {
            Ok(k) => k,
            Err(e) => return Value::Error(e),
        };

        if matrix.classify() == MatrixClass::Symbolic {
            return Value::Error(CalcError::unsupported_symbolic("scale"));
        }

        match matrix.to_dmatrix() {
            Ok(dm) => dmatrix_to_value(&(dm * k)),
            Err(e) => Value::Error(e),
        }
    }
}

// ============================================================================
// FORMAT - Render a result for display
// ============================================================================

pub struct FormatFn;

static FORMAT_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "Any", "Result value to format")];
static FORMAT_EXAMPLES: [&str; 1] = ["format(det(m)) → \"(x*x) - (1*0)\""];
static FORMAT_RELATED: [&str; 1] = ["det"];

impl FunctionPlugin for FormatFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "format",
            description: "Format a result to display text using the context render settings",
            usage: "format(value)",
            args: &FORMAT_ARGS,
            returns: "Text",
            examples: &FORMAT_EXAMPLES,
            category: "matrix",
            related: &FORMAT_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(CalcError::arg_count("format", 1, args.len()));
        }
        Value::Text(args[0].render(&ctx.render))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrio_core::{codes, RenderOptions};
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

    fn cell(v: &Value, i: usize, j: usize) -> Value {
        v.as_list().unwrap()[i].as_list().unwrap()[j].clone()
    }

    #[test]
    fn test_transpose_symbolic_tokens() {
        let t = TransposeFn.call(&[matrix_value(&[&["a", "b"], &["c", "d"]])], &ctx());
        assert_eq!(cell(&t, 0, 1).as_text(), Some("c"));
        assert_eq!(cell(&t, 1, 0).as_text(), Some("b"));
    }

    #[test]
    fn test_transpose_rectangular() {
        let t = TransposeFn.call(&[matrix_value(&[&["1", "2", "3"], &["4", "5", "6"]])], &ctx());
        assert_eq!(t.as_list().unwrap().len(), 3);
        assert_eq!(cell(&t, 2, 1).as_text(), Some("6"));
    }

    #[test]
    fn test_inverse_numeric() {
        let inv = InverseFn.call(&[matrix_value(&[&["2", "0"], &["0", "4"]])], &ctx());
        assert_eq!(cell(&inv, 0, 0).as_number(), Some(0.5));
        assert_eq!(cell(&inv, 1, 1).as_number(), Some(0.25));
    }

    #[test]
    fn test_inverse_numeric_singular() {
        let inv = InverseFn.call(&[matrix_value(&[&["1", "2"], &["2", "4"]])], &ctx());
        assert_eq!(inv.as_error().unwrap().code, codes::DOMAIN_ERROR);
    }

    #[test]
    fn test_inverse_symbolic_returns_parts() {
        let inv = InverseFn.call(&[matrix_value(&[&["a", "b"], &["c", "d"]])], &ctx());
        let det = inv.get("determinant");
        assert_eq!(det.as_expr().unwrap().render(), "(a*d) - (b*c)");

        // adjugate of [[a,b],[c,d]] is [[d,-b],[-c,a]]
        let adj = inv.get("adjugate");
        assert_eq!(cell(&adj, 0, 0).as_expr().unwrap().render(), "d");
        assert_eq!(cell(&adj, 0, 1).as_expr().unwrap().render(), "-b");
        assert_eq!(cell(&adj, 1, 0).as_expr().unwrap().render(), "-c");
        assert_eq!(cell(&adj, 1, 1).as_expr().unwrap().render(), "a");
    }

    #[test]
    fn test_inverse_symbolic_never_divides() {
        // Determinant is structurally zero; the engine must not notice.
        let inv = InverseFn.call(&[matrix_value(&[&["x", "x"], &["x", "x"]])], &ctx());
        let det = inv.get("determinant");
        assert_eq!(det.as_expr().unwrap().render(), "(x*x) - (x*x)");
        assert!(!inv.get("adjugate").is_error());
    }

    #[test]
    fn test_inverse_non_square() {
        let inv = InverseFn.call(&[matrix_value(&[&["a", "b", "c"], &["d", "e", "f"]])], &ctx());
        assert_eq!(inv.as_error().unwrap().code, codes::NON_SQUARE);
    }

    #[test]
    fn test_add_numeric() {
        let sum = MatAddFn.call(
            &[
                matrix_value(&[&["1", "2"], &["3", "4"]]),
                matrix_value(&[&["10", "20"], &["30", "40"]]),
            ],
            &ctx(),
        );
        assert_eq!(cell(&sum, 1, 1).as_number(), Some(44.0));
    }

    #[test]
    fn test_add_symbolic_unsupported() {
        let sum = MatAddFn.call(
            &[
                matrix_value(&[&["x", "2"], &["3", "4"]]),
                matrix_value(&[&["1", "2"], &["3", "4"]]),
            ],
            &ctx(),
        );
        assert_eq!(sum.as_error().unwrap().code, codes::UNSUPPORTED_SYMBOLIC);
    }

    #[test]
    fn test_subtract_dimension_mismatch() {
        let diff = MatSubFn.call(
            &[
                matrix_value(&[&["1", "2"]]),
                matrix_value(&[&["1"], &["2"]]),
            ],
            &ctx(),
        );
        assert_eq!(diff.as_error().unwrap().code, codes::DOMAIN_ERROR);
    }

    #[test]
    fn test_multiply_numeric() {
        let prod = MatmulFn.call(
            &[
                matrix_value(&[&["1", "2"]]),
                matrix_value(&[&["3"], &["4"]]),
            ],
            &ctx(),
        );
        assert_eq!(cell(&prod, 0, 0).as_number(), Some(11.0));
    }

    #[test]
    fn test_multiply_symbolic_unsupported() {
        let prod = MatmulFn.call(
            &[
                matrix_value(&[&["x", "2"]]),
                matrix_value(&[&["3"], &["4"]]),
            ],
            &ctx(),
        );
        assert_eq!(prod.as_error().unwrap().code, codes::UNSUPPORTED_SYMBOLIC);
    }

    #[test]
    fn test_scale_numeric() {
        let scaled = ScaleFn.call(
            &[matrix_value(&[&["1", "-2"]]), Value::Number(3.0)],
            &ctx(),
        );
        assert_eq!(cell(&scaled, 0, 1).as_number(), Some(-6.0));
    }

    #[test]
    fn test_scale_accepts_token_scalar() {
        let scaled = ScaleFn.call(
            &[matrix_value(&[&["2"]]), Value::Text("0.5".to_string())],
            &ctx(),
        );
        assert_eq!(cell(&scaled, 0, 0).as_number(), Some(1.0));
    }

    #[test]
    fn test_format_uses_context_precision() {
        let registry = Arc::new(PluginRegistry::new());
        let ctx = EvalContext::new(registry).with_render(RenderOptions::with_precision(2));
        let out = FormatFn.call(&[Value::Number(1.0 / 3.0)], &ctx);
        assert_eq!(out.as_text(), Some("0.33"));
    }
}
