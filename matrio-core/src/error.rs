//! Structured errors
//!
//! Errors never crash the engine. They are values that propagate to the
//! display layer verbatim; no operation retries, recovers, or degrades to a
//! partial result.

use crate::TermError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    /// Operation requires `rows == cols`
    pub const NON_SQUARE: &str = "NON_SQUARE";
    /// Matrix has dimension zero
    pub const EMPTY_MATRIX: &str = "EMPTY_MATRIX";
    /// Operation has no symbolic implementation
    pub const UNSUPPORTED_SYMBOLIC: &str = "UNSUPPORTED_SYMBOLIC";
    /// Blank grid cell reached the engine
    pub const MISSING_ENTRY: &str = "MISSING_ENTRY";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Computation continued with degraded result
    Warning,
    /// Computation failed for this operation
    Error,
    /// Engine invariant broken
    Fatal,
}

/// Context about where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Operation name that was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,

    /// Grid row of the offending entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    /// Grid column of the offending entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,

    /// Propagation notes
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error surfaced to the display layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    /// Severity level
    pub severity: Severity,
}

impl CalcError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set operation context
    pub fn in_op(mut self, op: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.op = Some(op.into());
        self
    }

    /// Builder: set entry position context
    pub fn at_entry(mut self, row: usize, col: usize) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.row = Some(row);
        ctx.col = Some(col);
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn non_square(op: &str, rows: usize, cols: usize) -> Self {
        Self::new(
            codes::NON_SQUARE,
            format!("{} requires a square matrix, got {}×{}", op, rows, cols),
        )
        .with_suggestion("Use an n×n grid for this operation")
        .in_op(op)
    }

    pub fn empty_matrix(op: &str) -> Self {
        Self::new(codes::EMPTY_MATRIX, format!("{}: matrix has no rows", op))
            .with_suggestion("Provide at least a 1×1 matrix")
            .in_op(op)
    }

    pub fn unsupported_symbolic(op: &str) -> Self {
        Self::new(
            codes::UNSUPPORTED_SYMBOLIC,
            format!("Symbolic calculation for \"{}\" is not supported", op),
        )
        .with_suggestion("Symbolic matrices support det, inv, transpose, trace and charpoly")
        .in_op(op)
    }

    pub fn missing_entry(row: usize, col: usize) -> Self {
        Self::new(
            codes::MISSING_ENTRY,
            format!("Matrix has an empty cell at ({},{})", row, col),
        )
        .with_suggestion("Fill in every cell before calculating")
        .at_entry(row, col)
    }

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got),
        )
        .in_op(func)
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got),
        )
        .in_op(func)
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown operation: {}", name))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for CalcError {}

impl From<TermError> for CalcError {
    fn from(err: TermError) -> Self {
        match err {
            TermError::Empty => Self::new(codes::MISSING_ENTRY, "Matrix has an empty cell")
                .with_suggestion("Fill in every cell before calculating"),
        }
    }
}
