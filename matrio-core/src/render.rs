//! Deterministic render pass
//!
//! Expressions carry no display state; this module turns a finished tree
//! into text in one pass. Display settings that only matter at render time
//! (numeric precision, from the calculator's settings panel) travel in an
//! explicit [`RenderOptions`] value instead of process globals.

use crate::expr::{BinOp, Expr};
use serde::{Deserialize, Serialize};

/// Ambient formatting settings for final rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Significant digits for floating-point results. Symbolic tokens are
    /// rendered verbatim and never touched by this.
    pub precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { precision: 4 }
    }
}

impl RenderOptions {
    pub fn with_precision(precision: usize) -> Self {
        RenderOptions { precision }
    }
}

impl Expr {
    /// Render to text. Products parenthesize composite factors
    /// (`x*((a*d) - (b*c))`); additive chains are compact when every addend
    /// is atomic (`x+x`) and spaced with parenthesized addends otherwise
    /// (`(a*d) - (b*c)`).
    pub fn render(&self) -> String {
        match self {
            Expr::Literal(s) | Expr::Symbol(s) => s.clone(),
            Expr::Binary {
                op: BinOp::Mul,
                left,
                right,
            } => format!("{}*{}", wrap(left), wrap(right)),
            Expr::Binary { .. } => self.render_additive(),
            Expr::Neg(inner) => format!("-{}", wrap(inner)),
        }
    }

    /// Flatten the left-leaning `+`/`-` chain the engine builds and join it
    /// in one go, so `a+b+c` does not come out as `(a+b) + c`.
    fn render_additive(&self) -> String {
        let mut tail = Vec::new();
        let mut head = self;
        while let Expr::Binary { op, left, right } = head {
            if *op == BinOp::Mul {
                break;
            }
            tail.push((*op, right.as_ref()));
            head = left.as_ref();
        }
        tail.reverse();

        let spaced = !head.is_atom() || tail.iter().any(|(_, e)| !e.is_atom());
        let mut out = wrap(head);
        for (op, addend) in tail {
            if spaced {
                out.push(' ');
                out.push(op.glyph());
                out.push(' ');
            } else {
                out.push(op.glyph());
            }
            out.push_str(&wrap(addend));
        }
        out
    }
}

fn wrap(e: &Expr) -> String {
    if e.is_atom() {
        e.render()
    } else {
        format!("({})", e.render())
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Format a numeric result to `opts.precision` significant digits, with
/// trailing zeros trimmed ("1.5000" never reaches the display layer).
pub fn format_number(x: f64, opts: &RenderOptions) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    let digits = opts.precision.clamp(1, 17) as i32;
    let magnitude = x.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).clamp(0, 17) as usize;
    let fixed = format!("{:.*}", decimals, x);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}
