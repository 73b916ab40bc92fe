use super::FileEntry;

/// Which filesystem entries a picker shows and accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    pub allow_directories: bool,
    pub allow_files: bool,
    /// Required file extension, without the dot. `None` accepts any file.
    pub extension_filter: Option<String>,
}

impl FilterPolicy {
    pub fn directories_only() -> Self {
        Self {
            allow_directories: true,
            allow_files: false,
            extension_filter: None,
        }
    }

    /// Files with `extension`, plus directories to navigate through
    pub fn files_with_extension(extension: impl Into<String>) -> Self {
        Self {
            allow_directories: true,
            allow_files: true,
            extension_filter: Some(extension.into()),
        }
    }

    /// Whether `entry` should be listed
    pub fn is_visible(&self, entry: &FileEntry, show_hidden: bool) -> bool {
        if !default_visibility(entry, show_hidden) {
            return false;
        }
        if entry.is_dir {
            self.allow_directories
        } else {
            self.allow_files && self.extension_matches(&entry.name)
        }
    }

    /// Whether `entry` may be confirmed. When files are allowed, directories
    /// are only listed for navigation.
    pub fn is_selectable(&self, entry: &FileEntry, show_hidden: bool) -> bool {
        if !self.is_visible(entry, show_hidden) {
            return false;
        }
        if self.allow_files {
            !entry.is_dir
        } else {
            entry.is_dir
        }
    }

    /// The extension is the text after the last dot, so `.sc` has extension `sc`
    fn extension_matches(&self, name: &str) -> bool {
        match &self.extension_filter {
            Some(filter) => name
                .rsplit_once('.')
                .is_some_and(|(_, extension)| extension == filter),
            None => true,
        }
    }
}

/// Dotfiles are hidden unless the user asked to see them
fn default_visibility(entry: &FileEntry, show_hidden: bool) -> bool {
    show_hidden || !entry.name.starts_with('.')
}
