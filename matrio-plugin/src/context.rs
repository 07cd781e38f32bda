//! Evaluation Context

use crate::PluginRegistry;
use matrio_core::RenderOptions;
use std::sync::Arc;

/// Evaluation context passed to operation plugins
///
/// Carries the display settings (precision) the legacy app kept in shared
/// browser storage, as an explicit value instead.
pub struct EvalContext {
    pub render: RenderOptions,
    pub registry: Arc<PluginRegistry>,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            render: RenderOptions::default(),
            registry,
        }
    }

    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.render.precision = precision;
        self
    }
}
