use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::editor::{Editor, Mode};

pub fn handle_event(editor: &mut Editor, event: Event) {
    match event {
        Event::Key(key) => {
            // Clear any message on keypress
            editor.clear_message();
            handle_key(editor, key);
        }
        Event::Resize(_, _) => {
            // Resize is handled by the renderer
        }
        _ => {}
    }
}

fn handle_key(editor: &mut Editor, key: KeyEvent) {
    // Ctrl-C quits from any mode, discarding unapplied edits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        editor.quit();
        return;
    }

    match editor.mode {
        Mode::Normal => handle_normal_mode(editor, key),
        Mode::Insert => handle_insert_mode(editor, key),
        Mode::Command => handle_command_mode(editor, key),
        Mode::Picker => handle_picker_mode(editor, key),
    }
}

fn handle_normal_mode(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        // Ctrl-G browses from a path field
        KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            editor.open_picker();
        }

        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => editor.focus_next(),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => editor.focus_previous(),

        KeyCode::Char('h') | KeyCode::Left => editor.cycle_module(false),
        KeyCode::Char('l') | KeyCode::Right => editor.cycle_module(true),

        KeyCode::Char('i') => editor.enter_insert_mode(),
        KeyCode::Char('a') | KeyCode::Char('A') => editor.append(),
        KeyCode::Char('d') => editor.clear_field(),
        KeyCode::Enter => editor.open_picker(),

        KeyCode::Char(':') => editor.enter_command_mode(),

        _ => {}
    }
}

fn handle_insert_mode(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => editor.enter_normal_mode(),

        KeyCode::Char(c) => editor.insert_char(c),
        KeyCode::Backspace => editor.delete_char_backward(),

        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),

        _ => {}
    }
}

fn handle_picker_mode(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => editor.close_picker(),
        KeyCode::Char('j') | KeyCode::Down => editor.picker_move_down(),
        KeyCode::Char('k') | KeyCode::Up => editor.picker_move_up(),
        KeyCode::Char('l') | KeyCode::Tab => editor.picker_toggle_expanded(),
        KeyCode::Char('.') => editor.picker_toggle_hidden(),
        KeyCode::Enter => editor.picker_activate(),
        _ => {}
    }
}

fn handle_command_mode(editor: &mut Editor, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            editor.command_buffer.clear();
            editor.enter_normal_mode();
        }

        KeyCode::Enter => {
            editor.execute_command();
        }

        KeyCode::Backspace => {
            editor.command_buffer.pop();
            if editor.command_buffer.is_empty() {
                editor.enter_normal_mode();
            }
        }

        KeyCode::Char(c) => {
            editor.command_buffer.push(c);
        }

        _ => {}
    }
}
