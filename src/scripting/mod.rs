//! Scripting module - Rhai runtime for worksheet configuration
//!
//! Functions are exposed under the `lark` namespace:
//! - `lark::worksheet::*` - picker preferences, run configuration defaults, modules

mod api;
mod engine;

pub use engine::ScriptEngine;
