//! Core matrix types
//!
//! `TermMatrix` is the caller-facing grid of opaque tokens; classification
//! decides whether an operation runs on nalgebra (every token numeric) or on
//! the symbolic engine (at least one symbol). `ExprMatrix` is what the
//! symbolic engine produces and consumes.

use matrio_core::{CalcError, Expr, Term, Value};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Upper bound on the dimension the symbolic engine accepts. Cofactor
/// expansion is O(n!); the legacy UI capped its grid, this cap stands in for
/// it on the library boundary.
pub const MAX_SYMBOLIC_DIM: usize = 8;

/// Computation route for a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatrixClass {
    /// Every entry parses as a finite real; handled by nalgebra
    Numeric,
    /// At least one symbolic entry; handled by the Laplace engine
    Symbolic,
}

/// Immutable grid of caller-supplied tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMatrix {
    data: Vec<Vec<Term>>,
    rows: usize,
    cols: usize,
}

impl TermMatrix {
    /// Build from parsed rows. The empty matrix is rejected explicitly, as
    /// is a ragged grid.
    pub fn from_rows(data: Vec<Vec<Term>>) -> Result<Self, CalcError> {
        if data.is_empty() || data[0].is_empty() {
            return Err(CalcError::empty_matrix("matrix"));
        }

        let rows = data.len();
        let cols = data[0].len();
        for (i, row) in data.iter().enumerate() {
            if row.len() != cols {
                return Err(CalcError::domain_error(format!(
                    "matrix: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
        }

        Ok(Self { data, rows, cols })
    }

    /// Build from raw tokens; a blank cell reports its grid position.
    pub fn from_tokens(rows: &[Vec<&str>]) -> Result<Self, CalcError> {
        let mut data = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let mut parsed = Vec::with_capacity(row.len());
            for (j, token) in row.iter().enumerate() {
                let term = Term::parse(token).map_err(|_| CalcError::missing_entry(i, j))?;
                parsed.push(term);
            }
            data.push(parsed);
        }
        Self::from_rows(data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Term> {
        self.data.get(row).and_then(|r| r.get(col))
    }

    /// Numeric iff every entry is a finite real literal; one symbol forces
    /// the symbolic route. There is no mixed mode.
    pub fn classify(&self) -> MatrixClass {
        let all_numeric = self.data.iter().flatten().all(Term::is_literal);
        if all_numeric {
            MatrixClass::Numeric
        } else {
            MatrixClass::Symbolic
        }
    }

    /// Convert to nalgebra. Only valid on the numeric route.
    pub fn to_dmatrix(&self) -> Result<DMatrix<f64>, CalcError> {
        let mut out = DMatrix::zeros(self.rows, self.cols);
        for (i, row) in self.data.iter().enumerate() {
            for (j, term) in row.iter().enumerate() {
                out[(i, j)] = term.to_f64().ok_or_else(|| {
                    CalcError::internal(format!(
                        "numeric route taken with symbolic entry '{}'",
                        term.text()
                    ))
                    .at_entry(i, j)
                })?;
            }
        }
        Ok(out)
    }

    /// Lift every token into an expression atom for the symbolic engine.
    pub fn to_exprs(&self) -> ExprMatrix {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(Expr::from).collect())
            .collect();
        ExprMatrix {
            data,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Pure re-indexing; no arithmetic, terms are moved as-is.
    pub fn transpose(&self) -> TermMatrix {
        let data = (0..self.cols)
            .map(|j| (0..self.rows).map(|i| self.data[i][j].clone()).collect())
            .collect();
        TermMatrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    pub fn to_value(&self) -> Value {
        Value::List(
            self.data
                .iter()
                .map(|row| Value::List(row.iter().map(|t| Value::Text(t.text().to_string())).collect()))
                .collect(),
        )
    }
}

/// Grid of expressions produced by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExprMatrix {
    data: Vec<Vec<Expr>>,
    rows: usize,
    cols: usize,
}

impl ExprMatrix {
    /// Internal constructor; callers uphold rectangularity.
    pub fn from_rows(data: Vec<Vec<Expr>>) -> Result<Self, CalcError> {
        if data.is_empty() || data[0].is_empty() {
            return Err(CalcError::empty_matrix("matrix"));
        }
        let rows = data.len();
        let cols = data[0].len();
        for row in &data {
            if row.len() != cols {
                return Err(CalcError::internal("ragged expression grid"));
            }
        }
        Ok(Self { data, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Expr> {
        self.data.get(row).and_then(|r| r.get(col))
    }

    /// Direct entry access for the engine. Panics out of bounds; the engine
    /// only indexes within the dimensions it just read.
    pub fn entry(&self, row: usize, col: usize) -> &Expr {
        &self.data[row][col]
    }

    /// The (n−1)×(n−1) sub-matrix with one row and one column deleted.
    /// Callers guarantee a square matrix with `n ≥ 2`.
    pub fn minor(&self, row: usize, col: usize) -> ExprMatrix {
        let data: Vec<Vec<Expr>> = self
            .data
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != row)
            .map(|(_, r)| {
                r.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != col)
                    .map(|(_, e)| e.clone())
                    .collect()
            })
            .collect();
        ExprMatrix {
            rows: self.rows - 1,
            cols: self.cols - 1,
            data,
        }
    }

    pub fn transpose(&self) -> ExprMatrix {
        let data = (0..self.cols)
            .map(|j| (0..self.rows).map(|i| self.data[i][j].clone()).collect())
            .collect();
        ExprMatrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    pub fn to_value(&self) -> Value {
        Value::List(
            self.data
                .iter()
                .map(|row| Value::List(row.iter().cloned().map(Value::Expr).collect()))
                .collect(),
        )
    }
}
