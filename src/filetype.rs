//! Script file types recognized as worksheets

/// Extension worksheets use unless configured otherwise
pub const WORKSHEET_EXTENSION: &str = "sc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFileType {
    extension: String,
}

impl ScriptFileType {
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        // Accept ".sc" as well as "sc"
        let extension = extension.trim_start_matches('.').to_string();
        Self { extension }
    }

    pub fn worksheet() -> Self {
        Self::new(WORKSHEET_EXTENSION)
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl Default for ScriptFileType {
    fn default() -> Self {
        Self::worksheet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worksheet_extension_is_sc() {
        assert_eq!(ScriptFileType::default().extension(), "sc");
    }

    #[test]
    fn leading_dot_is_stripped() {
        assert_eq!(ScriptFileType::new(".rhai").extension(), "rhai");
    }
}
