use super::{ModuleRef, Project, RunConfiguration};

/// Owns the module choice of a form and persists it into run configurations
pub trait ModuleSelector {
    /// Seed the selection from `config`
    fn reset(&mut self, config: &RunConfiguration);

    /// Write the current selection into `config`
    fn apply_to(&self, config: &mut RunConfiguration);

    fn module(&self) -> Option<&ModuleRef>;

    fn select(&mut self, module: Option<ModuleRef>);
}

/// Module selector backed by the modules a project declares
pub struct ProjectModuleSelector {
    modules: Vec<ModuleRef>,
    selected: Option<ModuleRef>,
}

impl ProjectModuleSelector {
    pub fn new(project: &Project) -> Self {
        Self {
            modules: project.modules().to_vec(),
            selected: None,
        }
    }

    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    /// Cycle forward through the known modules, wrapping to "none"
    pub fn select_next(&mut self) {
        let next = match self.position() {
            Some(i) if i + 1 < self.modules.len() => Some(self.modules[i + 1].clone()),
            Some(_) => None,
            None => self.modules.first().cloned(),
        };
        self.selected = next;
    }

    /// Cycle backward through the known modules, wrapping to "none"
    pub fn select_previous(&mut self) {
        let prev = match self.position() {
            Some(0) => None,
            Some(i) => Some(self.modules[i - 1].clone()),
            None => self.modules.last().cloned(),
        };
        self.selected = prev;
    }

    // An unknown module kept from a config counts as "none" for cycling
    fn position(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        self.modules.iter().position(|m| m == selected)
    }
}

impl ModuleSelector for ProjectModuleSelector {
    fn reset(&mut self, config: &RunConfiguration) {
        if let Some(module) = &config.module_ref {
            if !self.modules.contains(module) {
                tracing::debug!("module {} is not declared by the project", module);
            }
        }
        self.selected = config.module_ref.clone();
    }

    fn apply_to(&self, config: &mut RunConfiguration) {
        config.module_ref = self.selected.clone();
    }

    fn module(&self) -> Option<&ModuleRef> {
        self.selected.as_ref()
    }

    fn select(&mut self, module: Option<ModuleRef>) {
        self.selected = module;
    }
}
