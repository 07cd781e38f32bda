//! Helper functions for matrix operations

use crate::types::TermMatrix;
use matrio_core::{CalcError, Term, Value};
use nalgebra::DMatrix;

/// Extract a matrix of tokens from a nested-list Value. Cells are Text
/// tokens (literal or symbol) or plain Numbers; blank cells error with their
/// grid position.
pub fn extract_term_matrix(value: &Value, func: &str, arg: &str) -> Result<TermMatrix, CalcError> {
    let Value::List(rows) = value else {
        return Err(CalcError::arg_type(func, arg, "Matrix", value.type_name()));
    };

    let mut data = Vec::with_capacity(rows.len());
    for (i, row_val) in rows.iter().enumerate() {
        let Value::List(cells) = row_val else {
            return Err(CalcError::domain_error(format!(
                "{}: {} row {} must be a list",
                func, arg, i
            )));
        };
        let mut row = Vec::with_capacity(cells.len());
        for (j, cell) in cells.iter().enumerate() {
            row.push(extract_term(cell, func, arg, i, j)?);
        }
        data.push(row);
    }

    TermMatrix::from_rows(data).map_err(|e| e.in_op(func))
}

fn extract_term(cell: &Value, func: &str, arg: &str, row: usize, col: usize) -> Result<Term, CalcError> {
    match cell {
        Value::Text(token) => {
            Term::parse(token).map_err(|_| CalcError::missing_entry(row, col).in_op(func))
        }
        Value::Number(n) if n.is_finite() => Ok(Term::Literal(format!("{}", n))),
        Value::Number(_) => Err(CalcError::domain_error(format!(
            "{}: {}[{}][{}] must be finite",
            func, arg, row, col
        ))),
        other => Err(CalcError::domain_error(format!(
            "{}: {}[{}][{}] must be a token or number, got {}",
            func,
            arg,
            row,
            col,
            other.type_name()
        ))),
    }
}

/// Extract a column of tokens (for the equation solver's right-hand side).
pub fn extract_term_vector(value: &Value, func: &str, arg: &str) -> Result<Vec<Term>, CalcError> {
    let Value::List(cells) = value else {
        return Err(CalcError::arg_type(func, arg, "Vector", value.type_name()));
    };
    if cells.is_empty() {
        return Err(CalcError::empty_matrix(func));
    }
    let mut out = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        out.push(extract_term(cell, func, arg, i, 0)?);
    }
    Ok(out)
}

/// Extract a symbol name (the characteristic-polynomial variable). A token
/// that parses as a number is not a symbol.
pub fn extract_symbol(value: &Value, func: &str, arg: &str) -> Result<String, CalcError> {
    let Value::Text(raw) = value else {
        return Err(CalcError::arg_type(func, arg, "symbol", value.type_name()));
    };
    match Term::parse(raw) {
        Ok(Term::Symbol(name)) => Ok(name),
        Ok(Term::Literal(_)) => Err(CalcError::arg_type(func, arg, "symbol", "numeric literal")),
        Err(_) => Err(CalcError::domain_error(format!(
            "{}: {} must be a non-empty symbol name",
            func, arg
        ))),
    }
}

/// Extract a scalar, accepting a Number or a numeric token.
pub fn extract_f64(value: &Value, func: &str, arg: &str) -> Result<f64, CalcError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(token) => match Term::parse(token) {
            Ok(Term::Literal(s)) => s
                .parse::<f64>()
                .map_err(|_| CalcError::internal("literal token failed to reparse")),
            _ => Err(CalcError::arg_type(func, arg, "Number", "Text")),
        },
        other => Err(CalcError::arg_type(func, arg, "Number", other.type_name())),
    }
}

/// Squareness gate, run before any classification or recursive work.
pub fn check_square(m: &TermMatrix, func: &str) -> Result<(), CalcError> {
    if !m.is_square() {
        return Err(CalcError::non_square(func, m.rows(), m.cols()));
    }
    Ok(())
}

/// Check that two matrices have the same dimensions
pub fn check_same_dims(a: &TermMatrix, b: &TermMatrix, func: &str) -> Result<(), CalcError> {
    if a.rows() != b.rows() || a.cols() != b.cols() {
        return Err(CalcError::domain_error(format!(
            "{}: matrices must have same dimensions: {}×{} vs {}×{}",
            func,
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

/// Convert a numeric result back to the nested-list Value shape.
pub fn dmatrix_to_value(m: &DMatrix<f64>) -> Value {
    Value::List(
        (0..m.nrows())
            .map(|i| Value::List((0..m.ncols()).map(|j| Value::Number(m[(i, j)])).collect()))
            .collect(),
    )
}
