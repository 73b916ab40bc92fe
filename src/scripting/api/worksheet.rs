//! lark::worksheet - Picker preferences, defaults and modules
//!
//! Usage in Rhai:
//! ```rhai
//! lark::worksheet::set_worksheet_extension("sc");
//! lark::worksheet::set_default_runtime_options("-Djline.terminal=NONE -Xmx1g");
//! lark::worksheet::add_module("core");
//! ```

use rhai::plugin::*;
use std::sync::{Arc, RwLock};

use crate::config::Settings;

/// Create the worksheet module with access to settings
pub fn create_module(settings: Arc<RwLock<Settings>>) -> rhai::Module {
    let mut module = rhai::Module::new();

    // set_show_hidden_files(enabled: bool)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("set_show_hidden_files", move |enabled: bool| {
            if let Ok(mut settings) = s.write() {
                settings.show_hidden_files = enabled;
            }
            Ok(())
        });
    }

    // set_worksheet_extension(ext: &str)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("set_worksheet_extension", move |ext: &str| {
            if let Ok(mut settings) = s.write() {
                settings.worksheet_extension = ext.trim_start_matches('.').to_string();
            }
            Ok(())
        });
    }

    // get_worksheet_extension() -> String
    {
        let s = Arc::clone(&settings);
        module.set_native_fn(
            "get_worksheet_extension",
            move || -> Result<String, Box<EvalAltResult>> {
                Ok(s.read()
                    .map(|s| s.worksheet_extension.clone())
                    .unwrap_or_default())
            },
        );
    }

    // set_default_runtime_options(options: &str)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("set_default_runtime_options", move |options: &str| {
            if let Ok(mut settings) = s.write() {
                settings.default_runtime_options = options.to_string();
            }
            Ok(())
        });
    }

    // add_module(name: &str)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("add_module", move |name: &str| {
            if let Ok(mut settings) = s.write() {
                settings.add_module(name);
            }
            Ok(())
        });
    }

    // list_modules() -> Array
    {
        let s = Arc::clone(&settings);
        module.set_native_fn(
            "list_modules",
            move || -> Result<rhai::Array, Box<EvalAltResult>> {
                let modules = s.read().map(|s| s.modules.clone()).unwrap_or_default();
                Ok(modules
                    .into_iter()
                    .map(|m| rhai::Dynamic::from(m.name().to_string()))
                    .collect())
            },
        );
    }

    module
}
