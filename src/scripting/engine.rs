//! The Rhai scripting engine for worksheet configuration
//!
//! Provides the `lark` namespace with the worksheet API:
//! - `lark::worksheet::*` - pickers, run configuration defaults, modules

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rhai::{Engine, Scope};

use super::api;
use crate::config::Settings;
use crate::error::{Result, WorksheetError};

pub struct ScriptEngine {
    engine: Engine,
    settings: Arc<RwLock<Settings>>,
}

impl ScriptEngine {
    /// Create a new script engine with fresh settings
    pub fn new() -> Self {
        let settings = Arc::new(RwLock::new(Settings::default()));
        let engine = Self::create_engine(Arc::clone(&settings));

        Self { engine, settings }
    }

    fn create_engine(settings: Arc<RwLock<Settings>>) -> Engine {
        let mut engine = Engine::new();

        // Safety limits
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);

        let mut lark_module = rhai::Module::new();
        let worksheet_module = api::worksheet::create_module(Arc::clone(&settings));
        lark_module.set_sub_module("worksheet", worksheet_module);

        // Register `lark` as a static module (accessible as lark::*)
        engine.register_static_module("lark", lark_module.into());

        // stdout belongs to the terminal UI
        engine.on_print(|msg| tracing::info!(target: "rhai", "{}", msg));
        engine.on_debug(|msg, _, pos| tracing::debug!(target: "rhai", "{:?}: {}", pos, msg));

        engine
    }

    /// Load and execute a config file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| WorksheetError::io(path, e))?;

        self.eval(&content)?;
        tracing::info!("evaluated {}", path.display());
        Ok(())
    }

    /// Evaluate a Rhai script string
    pub fn eval(&mut self, script: &str) -> Result<()> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| WorksheetError::Script(format!("parse error: {}", e)))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| WorksheetError::Script(e.to_string()))?;

        Ok(())
    }

    /// Get the current settings (cloned)
    pub fn settings(&self) -> Settings {
        self.settings.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Get the config directory path
    /// Uses ~/.config/lark/ on all platforms for consistency
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("lark"))
    }

    /// Get the default config file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("worksheet.rhai"))
    }

    /// Load the default config file if it exists
    pub fn load_default(&mut self) -> Result<()> {
        if let Some(config_file) = Self::config_file() {
            if config_file.exists() {
                return self.load_file(&config_file);
            }
        }
        Ok(()) // No config file is fine
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new()
    }
}
