use std::io::{self, Write, stdout};

use crossterm::{
    cursor::{Hide, MoveTo, SetCursorStyle, Show},
    execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::editor::{Editor, Mode};
use crate::picker::PickerDialog;
use crate::runconfig::FormField;

const LABEL_WIDTH: u16 = 20;
const FORM_TOP: u16 = 2;
const PICKER_TOP: u16 = FORM_TOP + FormField::ALL.len() as u16 + 1;

pub struct Renderer {
    pub width: u16,
    pub height: u16,
}

impl Renderer {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self { width, height })
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn setup() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn teardown() -> io::Result<()> {
        execute!(
            stdout(),
            SetCursorStyle::DefaultUserShape,
            Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn render(&self, editor: &Editor) -> io::Result<()> {
        let mut stdout = stdout();

        // Hide cursor during redraw to prevent flicker
        queue!(stdout, Hide, ResetColor, Clear(ClearType::All))?;

        self.render_title(&mut stdout, editor)?;
        for (row, field) in FormField::ALL.iter().enumerate() {
            self.render_field(&mut stdout, editor, *field, FORM_TOP + row as u16)?;
        }
        if let Some(dialog) = &editor.picker {
            self.render_picker(&mut stdout, dialog)?;
        }
        self.render_status_line(&mut stdout, editor)?;
        self.position_cursor(&mut stdout, editor)?;

        stdout.flush()?;
        Ok(())
    }

    fn render_title(&self, stdout: &mut impl Write, editor: &Editor) -> io::Result<()> {
        queue!(stdout, MoveTo(0, 0), SetAttribute(Attribute::Bold))?;
        let marker = if editor.dirty { " [+]" } else { "" };
        let title = format!(
            " Worksheet run configuration{} ({})",
            marker,
            editor.store_path().display()
        );
        queue!(stdout, Print(self.fit(&title, self.width as usize)))?;
        queue!(stdout, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn render_field(
        &self,
        stdout: &mut impl Write,
        editor: &Editor,
        field: FormField,
        row: u16,
    ) -> io::Result<()> {
        let is_focused = editor.focused == field;
        queue!(stdout, MoveTo(0, row))?;

        if is_focused {
            queue!(stdout, SetForegroundColor(Color::Yellow))?;
        } else {
            queue!(stdout, SetForegroundColor(Color::DarkGrey))?;
        }
        let marker = if is_focused { ">" } else { " " };
        let label = format!("{} {}", marker, field.label());
        queue!(stdout, Print(self.fit(&label, LABEL_WIDTH as usize)))?;

        let value = editor.form.field(field);
        let (text, color) = if field == FormField::Module && value.is_empty() {
            ("<none>".to_string(), Color::DarkGrey)
        } else {
            (value, Color::White)
        };
        let width = self.value_width();
        let text = if is_focused && editor.mode == Mode::Insert {
            let offset = scroll_offset(editor.cursor, width);
            text.chars().skip(offset).collect()
        } else {
            text
        };
        queue!(stdout, SetForegroundColor(color))?;
        queue!(stdout, Print(self.fit(&text, width)))?;
        queue!(stdout, ResetColor)?;
        Ok(())
    }

    fn render_picker(&self, stdout: &mut impl Write, dialog: &PickerDialog) -> io::Result<()> {
        let width = self.width as usize;

        queue!(stdout, MoveTo(0, PICKER_TOP), SetAttribute(Attribute::Bold))?;
        let hidden = if dialog.show_hidden { " (hidden shown)" } else { "" };
        let title = format!(" {}: {}{}", dialog.title, dialog.root_dir.display(), hidden);
        queue!(stdout, Print(self.fit(&title, width)))?;
        queue!(stdout, SetAttribute(Attribute::Reset))?;

        // Rows between the picker title and the status line
        let rows = self.height.saturating_sub(PICKER_TOP + 2) as usize;
        if rows == 0 {
            return Ok(());
        }

        if dialog.entries.is_empty() {
            queue!(
                stdout,
                MoveTo(0, PICKER_TOP + 1),
                SetForegroundColor(Color::DarkGrey)
            )?;
            queue!(stdout, Print("   (nothing to choose here)"))?;
            queue!(stdout, ResetColor)?;
            return Ok(());
        }

        // Keep the selection inside the visible window
        let scroll = dialog.selected.saturating_sub(rows - 1);

        for (i, entry) in dialog.entries.iter().enumerate().skip(scroll).take(rows) {
            let row = PICKER_TOP + 1 + (i - scroll) as u16;
            queue!(stdout, MoveTo(0, row))?;

            let is_selected = i == dialog.selected;
            if is_selected {
                queue!(stdout, SetBackgroundColor(Color::DarkBlue))?;
                queue!(stdout, SetForegroundColor(Color::White))?;
            } else if entry.is_dir {
                queue!(stdout, SetForegroundColor(Color::Blue))?;
            } else if dialog.is_selectable(entry) {
                queue!(stdout, SetForegroundColor(Color::Green))?;
            } else {
                queue!(stdout, SetForegroundColor(Color::White))?;
            }

            let indent = "  ".repeat(entry.depth);
            let icon = if entry.is_dir {
                if dialog.is_expanded(&entry.path) {
                    "▾ "
                } else {
                    "▸ "
                }
            } else {
                "  "
            };
            let display = format!(" {}{}{}", indent, icon, entry.name);
            queue!(stdout, Print(self.fit(&display, width)))?;
            queue!(stdout, ResetColor)?;
        }

        Ok(())
    }

    fn render_status_line(&self, stdout: &mut impl Write, editor: &Editor) -> io::Result<()> {
        let status_row = self.height.saturating_sub(1);
        queue!(stdout, MoveTo(0, status_row))?;

        // Command mode - just show the command
        if editor.mode == Mode::Command {
            queue!(stdout, Clear(ClearType::CurrentLine))?;
            queue!(stdout, Print(format!(":{}", editor.command_buffer)))?;
            return Ok(());
        }

        // Message - show prominently
        if let Some(ref msg) = editor.message {
            queue!(stdout, SetForegroundColor(Color::Yellow))?;
            queue!(stdout, Clear(ClearType::CurrentLine))?;
            queue!(stdout, Print(msg))?;
            queue!(stdout, ResetColor)?;
            return Ok(());
        }

        queue!(stdout, SetBackgroundColor(Color::DarkGrey))?;
        queue!(stdout, SetForegroundColor(Color::White))?;

        let hints = match editor.mode {
            Mode::Normal => "j/k field  i edit  h/l module  Enter browse  :w apply  :q quit",
            Mode::Insert => "Esc done",
            Mode::Picker => "j/k move  l expand  . hidden  Enter choose  Esc cancel",
            Mode::Command => "",
        };
        let left = format!(" {} | {} ", editor.mode.display(), editor.focused.label());
        let right = format!(" {} ", hints);
        let used = left.chars().count() + right.chars().count();
        let padding = (self.width as usize).saturating_sub(used);
        let status = format!("{}{}{}", left, " ".repeat(padding), right);

        queue!(stdout, Print(self.fit(&status, self.width as usize)))?;
        queue!(stdout, ResetColor)?;
        Ok(())
    }

    fn position_cursor(&self, stdout: &mut impl Write, editor: &Editor) -> io::Result<()> {
        match editor.mode {
            Mode::Command => {
                let last_col = self.width.saturating_sub(1) as usize;
                let cmd_col = (1 + editor.command_buffer.chars().count()).min(last_col);
                let cmd_row = self.height.saturating_sub(1);
                queue!(stdout, MoveTo(cmd_col as u16, cmd_row))?;
                queue!(stdout, SetCursorStyle::BlinkingBar)?;
                queue!(stdout, Show)?;
            }
            Mode::Insert => {
                let row = FormField::ALL
                    .iter()
                    .position(|f| *f == editor.focused)
                    .unwrap_or(0) as u16;
                let width = self.value_width();
                let visible = editor.cursor - scroll_offset(editor.cursor, width);
                let last_col = self.width.saturating_sub(1) as usize;
                let col = (LABEL_WIDTH as usize + visible).min(last_col);
                queue!(stdout, MoveTo(col as u16, FORM_TOP + row))?;
                queue!(stdout, SetCursorStyle::BlinkingBar)?;
                queue!(stdout, Show)?;
            }
            _ => {
                queue!(stdout, Hide)?;
            }
        }
        Ok(())
    }

    /// Columns available for a field value
    fn value_width(&self) -> usize {
        self.width.saturating_sub(LABEL_WIDTH) as usize
    }

    /// Pad or truncate `text` to exactly `width` characters
    fn fit(&self, text: &str, width: usize) -> String {
        format!("{:width$}", text, width = width)
            .chars()
            .take(width)
            .collect()
    }
}

/// First character shown so that column `cursor` stays inside `width` columns
fn scroll_offset(cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    cursor.saturating_sub(width - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_field_does_not_scroll() {
        assert_eq!(scroll_offset(0, 40), 0);
        assert_eq!(scroll_offset(39, 40), 0);
    }

    #[test]
    fn cursor_past_width_scrolls_to_last_column() {
        assert_eq!(scroll_offset(40, 40), 1);
        assert_eq!(scroll_offset(70_000, 40), 70_000 - 39);
        assert_eq!(70_000 - scroll_offset(70_000, 40), 39);
    }

    #[test]
    fn zero_width_keeps_cursor_at_origin() {
        assert_eq!(scroll_offset(5, 0), 5);
    }
}
