use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::PathPicker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub depth: usize,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self {
            name,
            path,
            is_dir,
            depth: 0,
        }
    }
}

/// Tree listing of a directory, filtered by a picker.
///
/// Listing never fails: an unreadable directory contributes no entries.
pub struct PickerDialog {
    pub title: &'static str,
    pub entries: Vec<FileEntry>,
    pub selected: usize,
    pub root_dir: PathBuf,
    pub show_hidden: bool,
    picker: PathPicker,
    expanded: HashSet<PathBuf>,
}

impl PickerDialog {
    pub fn new(picker: PathPicker, root_dir: PathBuf, show_hidden: bool) -> Self {
        let mut dialog = Self {
            title: picker.title,
            entries: Vec::new(),
            selected: 0,
            root_dir,
            show_hidden,
            picker,
            expanded: HashSet::new(),
        };
        dialog.refresh();
        dialog
    }

    pub fn refresh(&mut self) {
        self.entries.clear();
        self.build_tree(&self.root_dir.clone(), 0);
        if self.selected >= self.entries.len() {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }

    fn build_tree(&mut self, dir: &Path, depth: usize) {
        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                tracing::debug!("cannot list {}: {}", dir.display(), e);
                return;
            }
        };

        let mut entries: Vec<FileEntry> = read_dir
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let path = e.path();
                // Follows symlinks; a dangling link has nothing to choose
                let metadata = match fs::metadata(&path) {
                    Ok(metadata) => metadata,
                    Err(err) => {
                        tracing::debug!("skipping {}: {}", path.display(), err);
                        return None;
                    }
                };
                let mut entry = FileEntry::new(path, metadata.is_dir());
                entry.depth = depth;
                Some(entry)
            })
            .filter(|e| self.picker.is_visible(e, self.show_hidden))
            .collect();

        // Sort: directories first, then alphabetically
        entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });

        for entry in entries {
            let is_expanded = self.expanded.contains(&entry.path);
            let entry_path = entry.path.clone();
            let is_dir = entry.is_dir;
            self.entries.push(entry);

            if is_dir && is_expanded {
                self.build_tree(&entry_path, depth + 1);
            }
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Expand or collapse the selected directory
    pub fn toggle_expanded(&mut self) {
        if let Some(entry) = self.entries.get(self.selected).cloned() {
            if entry.is_dir {
                if !self.expanded.remove(&entry.path) {
                    self.expanded.insert(entry.path);
                }
                self.refresh();
            }
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.refresh();
    }

    /// Confirm the selected entry if the policy accepts it; otherwise a
    /// directory is expanded for navigation.
    pub fn activate(&mut self) -> Option<FileEntry> {
        let entry = self.entries.get(self.selected)?.clone();
        if self.is_selectable(&entry) {
            Some(entry)
        } else {
            self.toggle_expanded();
            None
        }
    }

    pub fn picker(&self) -> &PathPicker {
        &self.picker
    }

    pub fn is_expanded(&self, path: &Path) -> bool {
        self.expanded.contains(path)
    }

    pub fn is_selectable(&self, entry: &FileEntry) -> bool {
        self.picker.policy.is_selectable(entry, self.show_hidden)
    }
}
