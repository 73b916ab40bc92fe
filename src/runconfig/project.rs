use std::path::{Path, PathBuf};

use super::ModuleRef;

/// The host project a run configuration belongs to
#[derive(Debug, Clone, Default)]
pub struct Project {
    base_dir: Option<PathBuf>,
    modules: Vec<ModuleRef>,
}

impl Project {
    pub fn new(base_dir: Option<PathBuf>, modules: Vec<ModuleRef>) -> Self {
        Self { base_dir, modules }
    }

    /// Open the project rooted at `dir`. An unresolvable root leaves the base unset.
    pub fn open(dir: &Path, modules: Vec<ModuleRef>) -> Self {
        let base_dir = match dir.canonicalize() {
            Ok(path) if path.is_dir() => Some(path),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("project base {} unresolved: {}", dir.display(), e);
                None
            }
        };
        Self::new(base_dir, modules)
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Base directory as a display string, if known
    pub fn base_path(&self) -> Option<String> {
        self.base_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }

    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_resolves_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::open(dir.path(), Vec::new());
        assert_eq!(
            project.base_dir(),
            Some(dir.path().canonicalize().unwrap().as_path())
        );
    }

    #[test]
    fn open_missing_directory_has_no_base() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::open(&dir.path().join("gone"), Vec::new());
        assert!(project.base_path().is_none());
    }

    #[test]
    fn open_file_has_no_base() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(Project::open(&file, Vec::new()).base_dir().is_none());
    }
}
