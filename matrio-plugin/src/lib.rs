//! Matrio Plugin System
//!
//! Every calculator operation is a `FunctionPlugin` registered by name in a
//! `PluginRegistry`; the dispatcher resolves the requested operation id and
//! calls it with an `EvalContext`.

mod context;
mod registry;
mod traits;

pub use context::EvalContext;
pub use registry::PluginRegistry;
pub use traits::{ArgMeta, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin, PluginRegistry};
    pub use matrio_core::prelude::*;
}
