//! Filtered path pickers bound to run configuration fields

mod browser;
mod policy;

use std::path::PathBuf;

pub use browser::{FileEntry, PickerDialog};
pub use policy::FilterPolicy;

use crate::filetype::ScriptFileType;
use crate::runconfig::{ConfigurationForm, FormField, ModuleSelector};

pub const WORKING_DIRECTORY_TITLE: &str = "Choose Working Directory";
pub const WORKSHEET_TITLE: &str = "Choose Worksheet";

/// A filter policy plus the form field a confirmed choice is written into
#[derive(Debug, Clone)]
pub struct PathPicker {
    pub title: &'static str,
    pub field: FormField,
    pub policy: FilterPolicy,
}

impl PathPicker {
    pub fn working_directory() -> Self {
        Self {
            title: WORKING_DIRECTORY_TITLE,
            field: FormField::WorkingDirectory,
            policy: FilterPolicy::directories_only(),
        }
    }

    pub fn worksheet(file_type: &ScriptFileType) -> Self {
        Self {
            title: WORKSHEET_TITLE,
            field: FormField::ScriptPath,
            policy: FilterPolicy::files_with_extension(file_type.extension()),
        }
    }

    /// The picker bound to `field`, if that field is a path
    pub fn for_field(field: FormField, file_type: &ScriptFileType) -> Option<Self> {
        match field {
            FormField::WorkingDirectory => Some(Self::working_directory()),
            FormField::ScriptPath => Some(Self::worksheet(file_type)),
            _ => None,
        }
    }

    pub fn is_visible(&self, entry: &FileEntry, show_hidden: bool) -> bool {
        self.policy.is_visible(entry, show_hidden)
    }

    /// Write the chosen path into the bound field as-is
    pub fn on_confirm<S: ModuleSelector>(
        &self,
        form: &mut ConfigurationForm<S>,
        entry: &FileEntry,
    ) {
        let path = entry.path.to_string_lossy().to_string();
        tracing::debug!("{}: {}", self.title, path);
        form.set_field(self.field, path);
    }

    /// Open a browse dialog rooted at `root`
    pub fn browse(&self, root: PathBuf, show_hidden: bool) -> PickerDialog {
        PickerDialog::new(self.clone(), root, show_hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runconfig::form_for;

    #[test]
    fn pickers_exist_only_for_path_fields() {
        let ft = ScriptFileType::worksheet();
        assert!(PathPicker::for_field(FormField::WorkingDirectory, &ft).is_some());
        assert!(PathPicker::for_field(FormField::ScriptPath, &ft).is_some());
        assert!(PathPicker::for_field(FormField::RuntimeOptions, &ft).is_none());
        assert!(PathPicker::for_field(FormField::Module, &ft).is_none());
    }

    #[test]
    fn worksheet_picker_uses_registered_extension() {
        let picker = PathPicker::worksheet(&ScriptFileType::new("rhai"));
        assert_eq!(picker.title, "Choose Worksheet");
        assert!(picker.is_visible(&FileEntry::new("/w/init.rhai", false), false));
        assert!(!picker.is_visible(&FileEntry::new("/w/demo.sc", false), false));
    }

    #[test]
    fn confirm_writes_path_into_bound_field() {
        let mut form = form_for(Some("/proj"));
        let picker = PathPicker::working_directory();
        picker.on_confirm(&mut form, &FileEntry::new("/proj/sheets/../out", true));
        assert_eq!(form.working_directory(), "/proj/sheets/../out");
        assert_eq!(form.script_path(), "");
    }

    #[test]
    fn confirm_worksheet_leaves_other_fields() {
        let mut form = form_for(Some("/proj"));
        let picker = PathPicker::worksheet(&ScriptFileType::worksheet());
        picker.on_confirm(&mut form, &FileEntry::new("/proj/demo.sc", false));
        assert_eq!(form.script_path(), "/proj/demo.sc");
        assert_eq!(form.working_directory(), "/proj");
    }

    #[test]
    fn cancelled_browse_leaves_field_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut form = form_for(Some("/proj"));
        form.set_field(FormField::ScriptPath, "/proj/keep.sc");

        let picker = PathPicker::worksheet(&ScriptFileType::worksheet());
        let mut dialog = picker.browse(dir.path().join("missing"), false);
        if let Some(entry) = dialog.activate() {
            picker.on_confirm(&mut form, &entry);
        }
        assert_eq!(form.script_path(), "/proj/keep.sc");
    }
}
