use std::fmt;

use serde::{Deserialize, Serialize};

use super::Project;

/// Runtime options a new worksheet run configuration starts with
pub const DEFAULT_RUNTIME_OPTIONS: &str = "-Djline.terminal=NONE";

/// Opaque reference to a build module providing classpath/context
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleRef(String);

impl ModuleRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted description of how to launch a worksheet session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfiguration {
    pub runtime_options: String,
    pub working_directory: String,
    pub script_path: String,
    pub module_ref: Option<ModuleRef>,
}

impl RunConfiguration {
    /// A fresh record for `project`: default options, base directory as cwd
    pub fn for_project(project: &Project, runtime_options: &str) -> Self {
        Self {
            runtime_options: runtime_options.to_string(),
            working_directory: project.base_path().unwrap_or_default(),
            script_path: String::new(),
            module_ref: None,
        }
    }
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            runtime_options: DEFAULT_RUNTIME_OPTIONS.to_string(),
            working_directory: String::new(),
            script_path: String::new(),
            module_ref: None,
        }
    }
}
