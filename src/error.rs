use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorksheetError>;

/// Errors raised outside the form core: persistence, scripting and terminal I/O.
#[derive(Debug, Error)]
pub enum WorksheetError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed run configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize run configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl WorksheetError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
