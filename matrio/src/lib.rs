//! Matrio - Matrix calculator engine
//!
//! The calculator UI hands this crate a grid of tokens and an operation id;
//! the engine classifies the grid, routes all-numeric matrices to nalgebra
//! and symbolic matrices to the Laplace expansion engine, and returns a
//! structured [`Value`] for the display layer to render.

pub use matrio_core::{format_number, CalcError, Expr, RenderOptions, Term, Value};
pub use matrio_matrix::{laplace, ExprMatrix, MatrixClass, TermMatrix, MAX_SYMBOLIC_DIM};
pub use matrio_plugin::{EvalContext, PluginRegistry};

use std::sync::Arc;

/// Main calculator engine
pub struct Calculator {
    registry: Arc<PluginRegistry>,
    render: RenderOptions,
}

impl Calculator {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            render: RenderOptions::default(),
        }
    }

    /// Engine with the full matrix operation set registered.
    pub fn with_matrix_library() -> Self {
        Self::new(matrio_matrix::load_matrix_library(PluginRegistry::new()))
    }

    /// Display precision for numeric results (from the settings panel).
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.render.precision = precision;
        self
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Run one operation. Unknown ids and all operation failures come back
    /// as `Value::Error`; this never panics.
    pub fn calculate(&self, op: &str, args: &[Value]) -> Value {
        let ctx = EvalContext::new(self.registry.clone()).with_render(self.render.clone());
        self.registry.call_function(op, args, &ctx)
    }

    /// Render any result for display with this engine's settings.
    pub fn render(&self, value: &Value) -> String {
        value.render(&self.render)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::with_matrix_library()
    }
}

/// Build a matrix argument from raw tokens, the shape the grid UI supplies.
pub fn matrix(rows: &[&[&str]]) -> Value {
    Value::List(
        rows.iter()
            .map(|row| Value::List(row.iter().map(|t| Value::Text(t.to_string())).collect()))
            .collect(),
    )
}

/// Build a vector argument from raw tokens.
pub fn vector(cells: &[&str]) -> Value {
    Value::List(cells.iter().map(|t| Value::Text(t.to_string())).collect())
}
