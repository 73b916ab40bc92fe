//! On-disk persistence for run configurations
//!
//! Each project keeps its worksheet run configuration as pretty-printed JSON
//! under `<project>/.lark/worksheet.json`.

use std::fs;
use std::path::{Path, PathBuf};

use super::RunConfiguration;
use crate::error::{Result, WorksheetError};

pub struct RunConfigurationStore {
    path: PathBuf,
}

impl RunConfigurationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location inside `base_dir`
    pub fn for_project_dir(base_dir: &Path) -> Self {
        Self::new(base_dir.join(".lark").join("worksheet.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record. A missing file yields `None`.
    pub fn load(&self) -> Result<Option<RunConfiguration>> {
        if !self.path.exists() {
            tracing::debug!("no run configuration at {}", self.path.display());
            return Ok(None);
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| WorksheetError::io(&self.path, e))?;
        let config = serde_json::from_str(&content).map_err(|source| WorksheetError::Parse {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("loaded run configuration from {}", self.path.display());
        Ok(Some(config))
    }

    pub fn save(&self, config: &RunConfiguration) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| WorksheetError::io(parent, e))?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content).map_err(|e| WorksheetError::io(&self.path, e))?;

        tracing::info!("saved run configuration to {}", self.path.display());
        Ok(())
    }
}
