//! Matrix decompositions (numeric path only)
//!
//! Decompositions have no symbolic implementation; a symbolic matrix gets an
//! explicit UNSUPPORTED_SYMBOLIC error rather than a silent numeric fallback.

use crate::helpers::{check_square, dmatrix_to_value, extract_term_matrix};
use crate::types::MatrixClass;
use matrio_core::{CalcError, Value};
use matrio_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};
use nalgebra::DMatrix;
use std::collections::HashMap;

fn numeric_input(args: &[Value], op: &'static str, square: bool) -> Result<DMatrix<f64>, CalcError> {
    if args.len() != 1 {
        return Err(CalcError::arg_count(op, 1, args.len()));
    }
    let matrix = extract_term_matrix(&args[0], op, "matrix")?;
    if square {
        check_square(&matrix, op)?;
    }
    if matrix.classify() == MatrixClass::Symbolic {
        return Err(CalcError::unsupported_symbolic(op));
    }
    matrix.to_dmatrix()
}

// ============================================================================
// LU - LU decomposition with partial pivoting
// ============================================================================

pub struct LuFn;

static LU_ARGS: [ArgMeta; 1] = [ArgMeta::required("matrix", "Matrix", "Square numeric matrix")];
static LU_EXAMPLES: [&str; 1] = ["lu([[4, 3], [6, 3]]) → {L, U, P}"];
static LU_RELATED: [&str; 2] = ["qr", "solve"];

impl FunctionPlugin for LuFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "lu",
            description: "LU decomposition with partial pivoting (returns {L, U, P})",
            usage: "lu(matrix)",
            args: &LU_ARGS,
            returns: "Object",
            examples: &LU_EXAMPLES,
            category: "matrix",
            related: &LU_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let dm = match numeric_input(args, "lu", true) {
            Ok(dm) => dm,
            Err(e) => return Value::Error(e),
        };

        let n = dm.nrows();
        let lu = dm.lu();
        let (p, l, u) = lu.unpack();

        // Express the permutation as a matrix by applying it to identity.
        let mut p_data = DMatrix::<f64>::identity(n, n);
        p.permute_rows(&mut p_data);

        let mut obj = HashMap::new();
        obj.insert("L".to_string(), dmatrix_to_value(&l));
        obj.insert("U".to_string(), dmatrix_to_value(&u));
        obj.insert("P".to_string(), dmatrix_to_value(&p_data));
        Value::Object(obj)
    }
}

// ============================================================================
// QR - QR decomposition
// ============================================================================

pub struct QrFn;

static QR_ARGS: [ArgMeta; 1] = [ArgMeta::required("matrix", "Matrix", "Numeric matrix")];
static QR_EXAMPLES: [&str; 1] = ["qr([[1, 2], [3, 4]]) → {Q, R}"];
static QR_RELATED: [&str; 2] = ["lu", "eigs"];

impl FunctionPlugin for QrFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "qr",
            description: "QR decomposition (returns {Q, R})",
            usage: "qr(matrix)",
            args: &QR_ARGS,
            returns: "Object",
            examples: &QR_EXAMPLES,
            category: "matrix",
            related: &QR_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let dm = match numeric_input(args, "qr", false) {
            Ok(dm) => dm,
            Err(e) => return Value::Error(e),
        };

        let qr = dm.qr();
        let (q, r) = qr.unpack();

        let mut obj = HashMap::new();
        obj.insert("Q".to_string(), dmatrix_to_value(&q));
        obj.insert("R".to_string(), dmatrix_to_value(&r));
        Value::Object(obj)
    }
}

// ============================================================================
// EIGS - Eigenvalues (and eigenvectors for symmetric input)
// ============================================================================

pub struct EigenFn;

static EIGS_ARGS: [ArgMeta; 1] = [ArgMeta::required("matrix", "Matrix", "Square numeric matrix")];
static EIGS_EXAMPLES: [&str; 1] = ["eigs([[2, 0], [0, 3]]) → {values, vectors}"];
static EIGS_RELATED: [&str; 2] = ["charpoly", "qr"];

impl FunctionPlugin for EigenFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "eigs",
            description: "Eigen decomposition of a numeric matrix",
            usage: "eigs(matrix)",
            args: &EIGS_ARGS,
            returns: "Object",
            examples: &EIGS_EXAMPLES,
            category: "matrix",
            related: &EIGS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let dm = match numeric_input(args, "eigs", true) {
            Ok(dm) => dm,
            Err(e) => return Value::Error(e),
        };

        let eps = 1e-10;
        let is_symmetric = {
            let mut sym = true;
            'outer: for i in 0..dm.nrows() {
                for j in (i + 1)..dm.ncols() {
                    if (dm[(i, j)] - dm[(j, i)]).abs() > eps {
                        sym = false;
                        break 'outer;
                    }
                }
            }
            sym
        };

        let mut obj = HashMap::new();
        if is_symmetric {
            let eigen = dm.symmetric_eigen();
            obj.insert(
                "values".to_string(),
                Value::List(eigen.eigenvalues.iter().map(|&x| Value::Number(x)).collect()),
            );
            obj.insert("vectors".to_string(), dmatrix_to_value(&eigen.eigenvectors));
        } else {
            // Schur gives the real eigenvalues on the diagonal of T.
            let (_, t) = dm.schur().unpack();
            obj.insert(
                "values".to_string(),
                Value::List((0..t.nrows()).map(|i| Value::Number(t[(i, i)])).collect()),
            );
            obj.insert(
                "note".to_string(),
                Value::Text("For non-symmetric matrices, only real eigenvalues are returned".to_string()),
            );
        }
        Value::Object(obj)
    }
}
