use std::path::{Path, PathBuf};

use super::Mode;
use crate::config::Settings;
use crate::error::Result;
use crate::filetype::ScriptFileType;
use crate::picker::{PathPicker, PickerDialog};
use crate::runconfig::{
    ConfigurationForm, FormField, Project, ProjectModuleSelector, RunConfiguration,
    RunConfigurationStore,
};

/// Terminal editing session over one run configuration
pub struct Editor {
    pub form: ConfigurationForm<ProjectModuleSelector>,
    pub config: RunConfiguration,
    pub focused: FormField,
    /// Character column inside the focused text field
    pub cursor: usize,
    pub mode: Mode,
    pub command_buffer: String,
    pub picker: Option<PickerDialog>,
    pub message: Option<String>,
    pub running: bool,
    pub dirty: bool,
    store: RunConfigurationStore,
    project: Project,
    file_type: ScriptFileType,
    show_hidden: bool,
}

impl Editor {
    /// Open the stored configuration, or a fresh one for `project`
    pub fn open(
        project: Project,
        store: RunConfigurationStore,
        settings: &Settings,
    ) -> Result<Self> {
        let config = match store.load()? {
            Some(config) => config,
            None => RunConfiguration::for_project(&project, &settings.default_runtime_options),
        };
        Ok(Self::with_config(project, store, settings, config))
    }

    pub fn with_config(
        project: Project,
        store: RunConfigurationStore,
        settings: &Settings,
        config: RunConfiguration,
    ) -> Self {
        let mut form = ConfigurationForm::new(&project, ProjectModuleSelector::new(&project));
        form.load(&config);

        let mut editor = Self {
            form,
            config,
            focused: FormField::RuntimeOptions,
            cursor: 0,
            mode: Mode::default(),
            command_buffer: String::new(),
            picker: None,
            message: None,
            running: true,
            dirty: false,
            store,
            project,
            file_type: ScriptFileType::new(settings.worksheet_extension.clone()),
            show_hidden: settings.show_hidden_files,
        };
        editor.dirty = editor.form_differs();
        editor
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    // Field navigation

    pub fn focus_next(&mut self) {
        let pos = self.focused_index();
        self.focused = FormField::ALL[(pos + 1) % FormField::ALL.len()];
        self.cursor = 0;
    }

    pub fn focus_previous(&mut self) {
        let pos = self.focused_index();
        let len = FormField::ALL.len();
        self.focused = FormField::ALL[(pos + len - 1) % len];
        self.cursor = 0;
    }

    fn focused_index(&self) -> usize {
        FormField::ALL
            .iter()
            .position(|f| *f == self.focused)
            .unwrap_or(0)
    }

    // Text editing

    pub fn enter_insert_mode(&mut self) {
        if self.focused.is_text() {
            self.mode = Mode::Insert;
            self.cursor = self.cursor.min(self.field_len());
        } else {
            self.set_message("Use h/l to choose a module");
        }
    }

    /// Start editing at the end of the field (a)
    pub fn append(&mut self) {
        self.cursor = self.field_len();
        self.enter_insert_mode();
    }

    pub fn enter_normal_mode(&mut self) {
        self.mode = Mode::Normal;
        self.command_buffer.clear();
    }

    fn field_len(&self) -> usize {
        self.form.field(self.focused).chars().count()
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.field_len());
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut value = self.form.field(self.focused);
        let at = byte_offset(&value, self.cursor);
        value.insert(at, ch);
        self.form.set_field(self.focused, value);
        self.cursor += 1;
        self.dirty = true;
    }

    pub fn delete_char_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut value = self.form.field(self.focused);
        let at = byte_offset(&value, self.cursor - 1);
        value.remove(at);
        self.form.set_field(self.focused, value);
        self.cursor -= 1;
        self.dirty = true;
    }

    /// Clear the focused field (module field clears the selection)
    pub fn clear_field(&mut self) {
        self.form.set_field(self.focused, "");
        self.cursor = 0;
        self.dirty = true;
    }

    // Module selection

    pub fn cycle_module(&mut self, forward: bool) {
        if self.focused != FormField::Module {
            return;
        }
        let selector = self.form.module_selector_mut();
        if selector.modules().is_empty() {
            self.set_message("No modules declared (lark::worksheet::add_module)");
            return;
        }
        if forward {
            selector.select_next();
        } else {
            selector.select_previous();
        }
        self.dirty = true;
    }

    // Pickers

    pub fn open_picker(&mut self) {
        let Some(picker) = PathPicker::for_field(self.focused, &self.file_type) else {
            self.set_message("No browser for this field");
            return;
        };
        let root = self.picker_root();
        tracing::debug!("{} at {}", picker.title, root.display());
        self.picker = Some(picker.browse(root, self.show_hidden));
        self.mode = Mode::Picker;
    }

    /// Start browsing near the field's current value, else at the project base
    fn picker_root(&self) -> PathBuf {
        let current = PathBuf::from(self.form.field(self.focused));
        if current.is_dir() {
            return current;
        }
        if let Some(parent) = current.parent().filter(|p| p.is_dir()) {
            return parent.to_path_buf();
        }
        self.project
            .base_dir()
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn picker_move_up(&mut self) {
        if let Some(dialog) = &mut self.picker {
            dialog.move_up();
        }
    }

    pub fn picker_move_down(&mut self) {
        if let Some(dialog) = &mut self.picker {
            dialog.move_down();
        }
    }

    pub fn picker_toggle_expanded(&mut self) {
        if let Some(dialog) = &mut self.picker {
            dialog.toggle_expanded();
        }
    }

    pub fn picker_toggle_hidden(&mut self) {
        if let Some(dialog) = &mut self.picker {
            dialog.toggle_hidden();
            self.show_hidden = dialog.show_hidden;
        }
    }

    /// Confirm the selected entry, or descend into a directory
    pub fn picker_activate(&mut self) {
        let Some(dialog) = &mut self.picker else {
            return;
        };
        if let Some(entry) = dialog.activate() {
            dialog.picker().on_confirm(&mut self.form, &entry);
            self.dirty = true;
            self.close_picker();
        }
    }

    /// Leave the picker without touching the field
    pub fn close_picker(&mut self) {
        self.picker = None;
        self.mode = Mode::Normal;
    }

    // Commands

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_buffer.clear();
    }

    pub fn execute_command(&mut self) {
        let cmd = self.command_buffer.trim().to_string();
        match cmd.as_str() {
            "q" | "quit" => {
                if self.dirty {
                    self.set_message("Unapplied changes (use :q! to discard)");
                } else {
                    self.quit();
                }
            }
            "q!" => self.quit(),
            "w" | "write" => match self.commit() {
                Ok(_) => self.set_message(format!("Applied to {}", self.store.path().display())),
                Err(e) => self.set_message(format!("Error: {}", e)),
            },
            "wq" => match self.commit() {
                Ok(_) => self.quit(),
                Err(e) => self.set_message(format!("Error: {}", e)),
            },
            "e" | "edit" => {
                self.reload();
                self.set_message("Reverted to last applied configuration");
            }
            "" => {}
            _ => {
                self.set_message(format!("Unknown command: {}", cmd));
            }
        }
        self.command_buffer.clear();
        if self.mode == Mode::Command {
            self.mode = Mode::Normal;
        }
    }

    /// Apply the form to the configuration and persist it
    ///
    /// The in-memory configuration only changes once the record is saved.
    pub fn commit(&mut self) -> Result<()> {
        let mut applied = self.config.clone();
        self.form.apply(&mut applied);
        self.store.save(&applied)?;
        self.config = applied;
        self.dirty = false;
        tracing::info!(
            script = self.form.script_path(),
            working_directory = self.form.working_directory(),
            runtime_options = self.form.runtime_options(),
            module = ?self.form.module(),
            "run configuration applied"
        );
        Ok(())
    }

    /// Discard edits by reloading the form from the configuration
    pub fn reload(&mut self) {
        self.form.load(&self.config);
        self.cursor = 0;
        self.dirty = self.form_differs();
    }

    /// Whether applying the form would change the configuration
    fn form_differs(&self) -> bool {
        let mut applied = self.config.clone();
        self.form.apply(&mut applied);
        applied != self.config
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

/// Byte offset of character column `col` in `s`
fn byte_offset(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runconfig::ModuleRef;

    fn editor_in(dir: &Path, modules: &[&str]) -> Editor {
        let mut settings = Settings::default();
        for m in modules {
            settings.add_module(m);
        }
        let project = Project::open(dir, settings.modules.clone());
        let store = RunConfigurationStore::for_project_dir(dir);
        Editor::open(project, store, &settings).unwrap()
    }

    #[test]
    fn new_session_uses_project_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let editor = editor_in(dir.path(), &[]);
        let base = dir.path().canonicalize().unwrap();
        assert_eq!(editor.form.runtime_options(), "-Djline.terminal=NONE");
        assert_eq!(editor.form.working_directory(), base.to_string_lossy());
        assert_eq!(editor.mode, Mode::Normal);
        assert!(!editor.dirty);
    }

    #[test]
    fn insert_and_delete_edit_focused_field() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path(), &[]);
        editor.focused = FormField::ScriptPath;
        editor.enter_insert_mode();
        for ch in "a.sx".chars() {
            editor.insert_char(ch);
        }
        editor.delete_char_backward();
        editor.insert_char('c');
        assert_eq!(editor.form.script_path(), "a.sc");
        assert!(editor.dirty);
    }

    #[test]
    fn insert_in_middle_handles_multibyte() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path(), &[]);
        editor.form.set_field(FormField::RuntimeOptions, "-Dé=1");
        editor.cursor = 3;
        editor.enter_insert_mode();
        editor.insert_char('x');
        assert_eq!(editor.form.runtime_options(), "-Déx=1");
    }

    #[test]
    fn module_field_is_not_text_editable() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path(), &["core"]);
        editor.focused = FormField::Module;
        editor.enter_insert_mode();
        assert_eq!(editor.mode, Mode::Normal);
        editor.cycle_module(true);
        assert_eq!(editor.form.module(), Some(&ModuleRef::new("core")));
    }

    #[test]
    fn focus_wraps_around() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path(), &[]);
        editor.focus_previous();
        assert_eq!(editor.focused, FormField::Module);
        editor.focus_next();
        assert_eq!(editor.focused, FormField::RuntimeOptions);
    }

    #[test]
    fn write_command_persists_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path(), &[]);
        editor.form.set_field(FormField::ScriptPath, "/w/demo.sc");
        editor.command_buffer = "w".to_string();
        editor.execute_command();

        let stored = RunConfigurationStore::for_project_dir(dir.path())
            .load()
            .unwrap()
            .unwrap();
        assert_eq!(stored.script_path, "/w/demo.sc");
        assert_eq!(editor.mode, Mode::Normal);
    }

    #[test]
    fn quit_with_unapplied_changes_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path(), &[]);
        editor.focused = FormField::RuntimeOptions;
        editor.append();
        editor.insert_char('!');
        editor.command_buffer = "q".to_string();
        editor.execute_command();
        assert!(editor.running);

        editor.command_buffer = "q!".to_string();
        editor.execute_command();
        assert!(!editor.running);
        assert!(RunConfigurationStore::for_project_dir(dir.path())
            .load()
            .unwrap()
            .is_none());
    }

    #[test]
    fn edit_command_discards_edits() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path(), &[]);
        editor.form.set_field(FormField::RuntimeOptions, "-Xss4m");
        editor.dirty = true;
        editor.command_buffer = "e".to_string();
        editor.execute_command();
        assert_eq!(editor.form.runtime_options(), "-Djline.terminal=NONE");
        assert!(!editor.dirty);
    }

    #[test]
    fn picker_confirm_writes_worksheet_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("demo.sc"), "1").unwrap();
        let mut editor = editor_in(dir.path(), &[]);
        editor.focused = FormField::ScriptPath;
        editor.open_picker();
        assert_eq!(editor.mode, Mode::Picker);

        editor.picker_activate();
        let expected = dir.path().canonicalize().unwrap().join("demo.sc");
        assert_eq!(editor.form.script_path(), expected.to_string_lossy());
        assert_eq!(editor.mode, Mode::Normal);
        assert!(editor.picker.is_none());
    }

    #[test]
    fn picker_cancel_keeps_field() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("out")).unwrap();
        let mut editor = editor_in(dir.path(), &[]);
        let before = editor.form.working_directory().to_string();
        editor.focused = FormField::WorkingDirectory;
        editor.open_picker();
        editor.close_picker();
        assert_eq!(editor.form.working_directory(), before);
        assert!(!editor.dirty);
    }

    #[test]
    fn no_picker_for_runtime_options() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path(), &[]);
        editor.open_picker();
        assert_eq!(editor.mode, Mode::Normal);
        assert!(editor.message.is_some());
    }

    #[test]
    fn failed_write_keeps_last_saved_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default();
        let project = Project::open(dir.path(), Vec::new());
        // A directory cannot be written as the record file
        let store = RunConfigurationStore::new(dir.path());
        let config = RunConfiguration::for_project(&project, &settings.default_runtime_options);
        let mut editor = Editor::with_config(project, store, &settings, config);

        editor.form.set_field(FormField::RuntimeOptions, "-Xunsaved");
        editor.dirty = true;
        editor.command_buffer = "w".to_string();
        editor.execute_command();
        assert!(editor.message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(editor.config.runtime_options, "-Djline.terminal=NONE");
        assert!(editor.dirty);

        editor.command_buffer = "e".to_string();
        editor.execute_command();
        assert_eq!(editor.form.runtime_options(), "-Djline.terminal=NONE");
        assert!(!editor.dirty);
    }

    #[test]
    fn failed_write_quit_stays_open() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default();
        let project = Project::open(dir.path(), Vec::new());
        let store = RunConfigurationStore::new(dir.path());
        let config = RunConfiguration::for_project(&project, &settings.default_runtime_options);
        let mut editor = Editor::with_config(project, store, &settings, config);

        editor.form.set_field(FormField::ScriptPath, "/w/demo.sc");
        editor.dirty = true;
        editor.command_buffer = "wq".to_string();
        editor.execute_command();
        assert!(editor.running);
        assert!(editor.message.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn write_quit_saves_and_stops() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path(), &[]);
        editor.form.set_field(FormField::ScriptPath, "/w/demo.sc");
        editor.dirty = true;
        editor.command_buffer = "wq".to_string();
        editor.execute_command();

        assert!(!editor.running);
        assert!(!editor.dirty);
        let stored = RunConfigurationStore::for_project_dir(dir.path())
            .load()
            .unwrap()
            .unwrap();
        assert_eq!(stored.script_path, "/w/demo.sc");
        assert_eq!(editor.config, stored);
    }

    #[test]
    fn defaulted_working_directory_counts_as_unapplied() {
        let dir = tempfile::tempdir().unwrap();
        let store = RunConfigurationStore::for_project_dir(dir.path());
        store.save(&RunConfiguration::default()).unwrap();

        let mut editor = editor_in(dir.path(), &[]);
        let base = dir.path().canonicalize().unwrap();
        assert_eq!(editor.form.working_directory(), base.to_string_lossy());
        assert!(editor.dirty);

        editor.command_buffer = "e".to_string();
        editor.execute_command();
        assert!(editor.dirty);

        editor.command_buffer = "q".to_string();
        editor.execute_command();
        assert!(editor.running);
    }

    #[test]
    fn malformed_store_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".lark")).unwrap();
        std::fs::write(dir.path().join(".lark").join("worksheet.json"), "[").unwrap();

        let settings = Settings::default();
        let project = Project::open(dir.path(), Vec::new());
        let store = RunConfigurationStore::for_project_dir(dir.path());
        assert!(Editor::open(project, store, &settings).is_err());
    }
}
