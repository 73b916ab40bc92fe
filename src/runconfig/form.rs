use super::{DEFAULT_RUNTIME_OPTIONS, ModuleRef, ModuleSelector, Project, RunConfiguration};

/// The editable fields of a worksheet run configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    RuntimeOptions,
    WorkingDirectory,
    ScriptPath,
    Module,
}

impl FormField {
    /// Fields in display order
    pub const ALL: [FormField; 4] = [
        FormField::RuntimeOptions,
        FormField::WorkingDirectory,
        FormField::ScriptPath,
        FormField::Module,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::RuntimeOptions => "Runtime options",
            FormField::WorkingDirectory => "Working directory",
            FormField::ScriptPath => "Worksheet",
            FormField::Module => "Module",
        }
    }

    /// Whether the field is edited as free text
    pub fn is_text(&self) -> bool {
        !matches!(self, FormField::Module)
    }
}

/// In-memory view of a run configuration while it is being edited.
///
/// `load` only ever writes the form and `apply` only ever writes the
/// configuration.
pub struct ConfigurationForm<S: ModuleSelector> {
    runtime_options: String,
    working_directory: String,
    script_path: String,
    base_path: Option<String>,
    module_selector: S,
}

impl<S: ModuleSelector> ConfigurationForm<S> {
    pub fn new(project: &Project, module_selector: S) -> Self {
        let base_path = project.base_path();
        Self {
            runtime_options: DEFAULT_RUNTIME_OPTIONS.to_string(),
            working_directory: base_path.clone().unwrap_or_default(),
            script_path: String::new(),
            base_path,
            module_selector,
        }
    }

    /// Pull every field out of `config`
    pub fn load(&mut self, config: &RunConfiguration) {
        self.runtime_options = config.runtime_options.clone();
        self.working_directory = config.working_directory.clone();
        self.script_path = config.script_path.clone();
        self.module_selector.reset(config);

        if self.working_directory.is_empty() {
            if let Some(base) = &self.base_path {
                self.working_directory = base.clone();
            }
        }
    }

    /// Push every field into `config`
    pub fn apply(&self, config: &mut RunConfiguration) {
        config.runtime_options = self.runtime_options.clone();
        config.working_directory = self.working_directory.clone();
        config.script_path = self.script_path.clone();
        self.module_selector.apply_to(config);
    }

    pub fn field(&self, field: FormField) -> String {
        match field {
            FormField::RuntimeOptions => self.runtime_options.clone(),
            FormField::WorkingDirectory => self.working_directory.clone(),
            FormField::ScriptPath => self.script_path.clone(),
            FormField::Module => self
                .module_selector
                .module()
                .map(|m| m.name().to_string())
                .unwrap_or_default(),
        }
    }

    /// Set a field verbatim. An empty module name clears the selection.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::RuntimeOptions => self.runtime_options = value,
            FormField::WorkingDirectory => self.working_directory = value,
            FormField::ScriptPath => self.script_path = value,
            FormField::Module => {
                let module = (!value.is_empty()).then(|| ModuleRef::new(value));
                self.module_selector.select(module);
            }
        }
    }

    pub fn runtime_options(&self) -> &str {
        &self.runtime_options
    }

    pub fn working_directory(&self) -> &str {
        &self.working_directory
    }

    pub fn script_path(&self) -> &str {
        &self.script_path
    }

    pub fn module(&self) -> Option<&ModuleRef> {
        self.module_selector.module()
    }

    pub fn module_selector_mut(&mut self) -> &mut S {
        &mut self.module_selector
    }
}
