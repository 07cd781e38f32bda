//! Symbolic evaluator: recursive Laplace (cofactor) expansion
//!
//! Everything here is a pure function from an input grid to a fresh
//! expression tree. No simplification, no caching, no arithmetic: `1*0`
//! stays in the output, and `x` twice on a diagonal traces to `x+x`.
//! Cost is O(n!) by nature of unmemoized cofactor expansion, which is why
//! `MAX_SYMBOLIC_DIM` bounds the accepted dimension.

use crate::types::{ExprMatrix, TermMatrix, MAX_SYMBOLIC_DIM};
use matrio_core::{CalcError, Expr};

fn check_square(m: &ExprMatrix, op: &str) -> Result<(), CalcError> {
    if !m.is_square() {
        return Err(CalcError::non_square(op, m.rows(), m.cols()));
    }
    if m.rows() > MAX_SYMBOLIC_DIM {
        return Err(CalcError::domain_error(format!(
            "symbolic {} is limited to {}×{} matrices (cofactor expansion grows as n!)",
            op, MAX_SYMBOLIC_DIM, MAX_SYMBOLIC_DIM
        ))
        .in_op(op));
    }
    Ok(())
}

/// Determinant of a square grid of expressions.
pub fn determinant(m: &ExprMatrix) -> Result<Expr, CalcError> {
    check_square(m, "det")?;
    Ok(expand(m))
}

/// Recursive expansion along row 0. The square invariant is already
/// checked; dimension zero cannot be constructed.
fn expand(m: &ExprMatrix) -> Expr {
    let n = m.rows();
    if n == 1 {
        // Sole entry, returned unchanged.
        return m.entry(0, 0).clone();
    }
    if n == 2 {
        // Closed form: ends the recursion one level early and keeps the
        // common 2×2 output small.
        let a = m.entry(0, 0).clone();
        let b = m.entry(0, 1).clone();
        let c = m.entry(1, 0).clone();
        let d = m.entry(1, 1).clone();
        return Expr::sub(Expr::mul(a, d), Expr::mul(b, c));
    }

    // Sign of column j is (+,-,+,...); the leading + is elided by starting
    // the fold from the j = 0 term.
    let mut acc = Expr::mul(m.entry(0, 0).clone(), expand(&m.minor(0, 0)));
    for j in 1..n {
        let term = Expr::mul(m.entry(0, j).clone(), expand(&m.minor(0, j)));
        acc = if j % 2 == 0 {
            Expr::add(acc, term)
        } else {
            Expr::sub(acc, term)
        };
    }
    acc
}

/// Grid of signed minors: cofactor(i,j) is the minor determinant, negated
/// when `i + j` is odd.
pub fn cofactor_matrix(m: &ExprMatrix) -> Result<ExprMatrix, CalcError> {
    check_square(m, "cofactor")?;
    let n = m.rows();
    let mut grid = Vec::with_capacity(n);
    for i in 0..n {
        let mut row = Vec::with_capacity(n);
        for j in 0..n {
            // A 1×1 matrix has the empty minor; its determinant is the
            // empty product.
            let base = if n == 1 {
                Expr::Literal("1".to_string())
            } else {
                expand(&m.minor(i, j))
            };
            row.push(if (i + j) % 2 == 0 { base } else { Expr::neg(base) });
        }
        grid.push(row);
    }
    ExprMatrix::from_rows(grid)
}

/// Determinant and adjugate (transposed cofactor grid), returned separately.
///
/// The mathematically complete inverse is `adjugate / determinant`; forming
/// that division, and deciding whether the determinant is zero, is the
/// caller's job. This function never divides and never inspects the
/// determinant.
pub fn adjugate(m: &ExprMatrix) -> Result<(Expr, ExprMatrix), CalcError> {
    let det = determinant(m)?;
    let cofactors = cofactor_matrix(m)?;
    Ok((det, cofactors.transpose()))
}

/// det(A − λI): subtract the symbol from each diagonal entry, then reuse the
/// determinant expansion unchanged.
pub fn char_poly(m: &TermMatrix, symbol: &str) -> Result<Expr, CalcError> {
    let exprs = m.to_exprs();
    check_square(&exprs, "charpoly")?;
    let n = exprs.rows();
    let lambda = Expr::Symbol(symbol.to_string());
    let mut grid = Vec::with_capacity(n);
    for i in 0..n {
        let mut row = Vec::with_capacity(n);
        for j in 0..n {
            let entry = exprs.entry(i, j).clone();
            row.push(if i == j {
                Expr::sub(entry, lambda.clone())
            } else {
                entry
            });
        }
        grid.push(row);
    }
    determinant(&ExprMatrix::from_rows(grid)?)
}

/// Ordered sum of the diagonal, unsimplified.
pub fn trace(m: &ExprMatrix) -> Result<Expr, CalcError> {
    if !m.is_square() {
        return Err(CalcError::non_square("trace", m.rows(), m.cols()));
    }
    let mut acc = m.entry(0, 0).clone();
    for i in 1..m.rows() {
        acc = Expr::add(acc, m.entry(i, i).clone());
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrio_core::codes;

    fn grid(rows: &[Vec<&str>]) -> ExprMatrix {
        TermMatrix::from_tokens(rows).unwrap().to_exprs()
    }

    fn sym(s: &str) -> Expr {
        Expr::Symbol(s.to_string())
    }

    fn lit(s: &str) -> Expr {
        Expr::Literal(s.to_string())
    }

    #[test]
    fn test_determinant_1x1_is_entry_unchanged() {
        let det = determinant(&grid(&[vec!["x"]])).unwrap();
        assert_eq!(det, sym("x"));
        assert_eq!(det.render(), "x");
    }

    #[test]
    fn test_determinant_2x2_closed_form() {
        let det = determinant(&grid(&[vec!["a", "b"], vec!["c", "d"]])).unwrap();
        let expected = Expr::sub(Expr::mul(sym("a"), sym("d")), Expr::mul(sym("b"), sym("c")));
        assert_eq!(det, expected);
        assert_eq!(det.render(), "(a*d) - (b*c)");
    }

    #[test]
    fn test_determinant_3x3_signed_expansion() {
        // Literal digits 1..9: output stays an unsimplified three-term
        // expansion, no numeric evaluation.
        let det = determinant(&grid(&[
            vec!["1", "2", "3"],
            vec!["4", "5", "6"],
            vec!["7", "8", "9"],
        ]))
        .unwrap();

        let minor0 = Expr::sub(Expr::mul(lit("5"), lit("9")), Expr::mul(lit("6"), lit("8")));
        let minor1 = Expr::sub(Expr::mul(lit("4"), lit("9")), Expr::mul(lit("6"), lit("7")));
        let minor2 = Expr::sub(Expr::mul(lit("4"), lit("8")), Expr::mul(lit("5"), lit("7")));
        let expected = Expr::add(
            Expr::sub(
                Expr::mul(lit("1"), minor0),
                Expr::mul(lit("2"), minor1),
            ),
            Expr::mul(lit("3"), minor2),
        );
        assert_eq!(det, expected);
        assert_eq!(
            det.render(),
            "(1*((5*9) - (6*8))) - (2*((4*9) - (6*7))) + (3*((4*8) - (5*7)))"
        );
    }

    #[test]
    fn test_determinant_4x4_recurses_into_3x3() {
        let det = determinant(&grid(&[
            vec!["a", "0", "0", "0"],
            vec!["0", "b", "0", "0"],
            vec!["0", "0", "c", "0"],
            vec!["0", "0", "0", "d"],
        ]))
        .unwrap();
        // Four signed terms at the top level, no simplification of the zero
        // products.
        let text = det.render();
        assert_eq!(text.matches(" - ").count(), 2);
        assert_eq!(text.matches(" + ").count(), 1);
        assert!(text.starts_with("(a*"));
    }

    #[test]
    fn test_determinant_is_deterministic() {
        let m = grid(&[vec!["x", "1"], vec!["0", "x"]]);
        let first = determinant(&m).unwrap();
        let second = determinant(&m).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.render(), second.render());
    }

    #[test]
    fn test_determinant_rejects_non_square() {
        let err = determinant(&grid(&[vec!["a", "b", "c"], vec!["d", "e", "f"]])).unwrap_err();
        assert_eq!(err.code, codes::NON_SQUARE);
    }

    #[test]
    fn test_determinant_dimension_cap() {
        let n = MAX_SYMBOLIC_DIM + 1;
        let rows: Vec<Vec<&str>> = (0..n).map(|_| (0..n).map(|_| "x").collect()).collect();
        let err = determinant(&grid(&rows)).unwrap_err();
        assert_eq!(err.code, codes::DOMAIN_ERROR);
    }

    #[test]
    fn test_minor_extraction() {
        let m = grid(&[
            vec!["a", "b", "c"],
            vec!["d", "e", "f"],
            vec!["g", "h", "i"],
        ]);
        let minor = m.minor(1, 1);
        assert_eq!(minor.rows(), 2);
        assert_eq!(minor.cols(), 2);
        assert_eq!(minor.entry(0, 0), &sym("a"));
        assert_eq!(minor.entry(0, 1), &sym("c"));
        assert_eq!(minor.entry(1, 0), &sym("g"));
        assert_eq!(minor.entry(1, 1), &sym("i"));
    }

    #[test]
    fn test_cofactor_sign_parity() {
        let m = grid(&[
            vec!["a", "b", "c"],
            vec!["d", "e", "f"],
            vec!["g", "h", "i"],
        ]);
        let cof = cofactor_matrix(&m).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let negated = matches!(cof.entry(i, j), Expr::Neg(_));
                assert_eq!(
                    negated,
                    (i + j) % 2 == 1,
                    "cofactor({},{}) sign is wrong",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn test_cofactor_entries_are_minor_determinants() {
        let m = grid(&[vec!["a", "b"], vec!["c", "d"]]);
        let cof = cofactor_matrix(&m).unwrap();
        assert_eq!(cof.entry(0, 0), &sym("d"));
        assert_eq!(cof.entry(0, 1), &Expr::neg(sym("c")));
        assert_eq!(cof.entry(1, 0), &Expr::neg(sym("b")));
        assert_eq!(cof.entry(1, 1), &sym("a"));
    }

    #[test]
    fn test_adjugate_is_transposed_cofactors() {
        let m = grid(&[
            vec!["a", "b", "c"],
            vec!["d", "e", "f"],
            vec!["g", "h", "i"],
        ]);
        let cof = cofactor_matrix(&m).unwrap();
        let (_, adj) = adjugate(&m).unwrap();
        assert_eq!(adj, cof.transpose());
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(adj.entry(i, j), cof.entry(j, i));
            }
        }
    }

    #[test]
    fn test_adjugate_returns_determinant_separately() {
        // No division, no zero-check: the parts come back side by side even
        // when the determinant is visibly zero-ish garbage like x - x.
        let m = grid(&[vec!["x", "x"], vec!["x", "x"]]);
        let (det, adj) = adjugate(&m).unwrap();
        assert_eq!(
            det,
            Expr::sub(Expr::mul(sym("x"), sym("x")), Expr::mul(sym("x"), sym("x")))
        );
        assert_eq!(adj.rows(), 2);
    }

    #[test]
    fn test_adjugate_1x1() {
        let m = grid(&[vec!["x"]]);
        let (det, adj) = adjugate(&m).unwrap();
        assert_eq!(det, sym("x"));
        assert_eq!(adj.entry(0, 0), &lit("1"));
    }

    #[test]
    fn test_char_poly_reduces_to_shifted_determinant() {
        let m = TermMatrix::from_tokens(&[vec!["a", "b"], vec!["c", "d"]]).unwrap();
        let poly = char_poly(&m, "λ").unwrap();

        let shifted = ExprMatrix::from_rows(vec![
            vec![Expr::sub(sym("a"), sym("λ")), sym("b")],
            vec![sym("c"), Expr::sub(sym("d"), sym("λ"))],
        ])
        .unwrap();
        assert_eq!(poly, determinant(&shifted).unwrap());
        assert_eq!(poly.render(), "((a-λ)*(d-λ)) - (b*c)");
    }

    #[test]
    fn test_char_poly_only_touches_diagonal() {
        let m = TermMatrix::from_tokens(&[vec!["1", "2"], vec!["3", "4"]]).unwrap();
        let poly = char_poly(&m, "t").unwrap();
        assert_eq!(poly.render(), "((1-t)*(4-t)) - (2*3)");
    }

    #[test]
    fn test_trace_is_unsimplified() {
        let tr = trace(&grid(&[vec!["x", "1"], vec!["0", "x"]])).unwrap();
        assert_eq!(tr, Expr::add(sym("x"), sym("x")));
        assert_eq!(tr.render(), "x+x");
    }

    #[test]
    fn test_trace_order() {
        let tr = trace(&grid(&[
            vec!["a", "0", "0"],
            vec!["0", "b", "0"],
            vec!["0", "0", "c"],
        ]))
        .unwrap();
        assert_eq!(tr.render(), "a+b+c");
    }

    #[test]
    fn test_trace_rejects_non_square() {
        let err = trace(&grid(&[vec!["a", "b", "c"], vec!["d", "e", "f"]])).unwrap_err();
        assert_eq!(err.code, codes::NON_SQUARE);
    }
}
