use crate::filetype::WORKSHEET_EXTENSION;
use crate::runconfig::{DEFAULT_RUNTIME_OPTIONS, ModuleRef};

/// Worksheet settings that can be customized via Rhai config
#[derive(Debug, Clone)]
pub struct Settings {
    // Pickers
    pub show_hidden_files: bool,
    pub worksheet_extension: String,

    // New run configurations
    pub default_runtime_options: String,

    // Modules offered by the module selector, in declaration order
    pub modules: Vec<ModuleRef>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hidden_files: false,
            worksheet_extension: WORKSHEET_EXTENSION.to_string(),

            default_runtime_options: DEFAULT_RUNTIME_OPTIONS.to_string(),

            modules: Vec::new(),
        }
    }
}

impl Settings {
    /// Declare a module, ignoring duplicates and blank names
    pub fn add_module(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let module = ModuleRef::new(name);
        if !self.modules.contains(&module) {
            self.modules.push(module);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_worksheet_conventions() {
        let settings = Settings::default();
        assert_eq!(settings.worksheet_extension, "sc");
        assert_eq!(settings.default_runtime_options, "-Djline.terminal=NONE");
        assert!(!settings.show_hidden_files);
    }

    #[test]
    fn add_module_skips_duplicates_and_blanks() {
        let mut settings = Settings::default();
        settings.add_module("core");
        settings.add_module(" core ");
        settings.add_module("");
        settings.add_module("app");
        let names: Vec<&str> = settings.modules.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["core", "app"]);
    }
}
