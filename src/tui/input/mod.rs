mod controller;

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::app::{App, Hit};

pub use controller::{FocusState, InputController};

/// Dispatch one terminal event
pub fn handle_event(app: &mut App, event: Event, now: Instant) {
    match event {
        Event::Key(key) => handle_key(app, key, now),
        Event::Mouse(mouse) => handle_mouse(app, mouse, now),
        Event::FocusGained => app.picker.focus(now),
        Event::FocusLost => app.picker.blur(now),
        Event::Paste(text) => handle_paste(app, &text),
        Event::Resize(..) => {}
    }
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.kind == KeyEventKind::Release {
        if key.code == KeyCode::Backspace && app.release_backspace {
            app.picker.backspace_release();
        }
        return;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('q')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Backspace) => {
            app.picker.backspace_press();
            // No release will arrive; run the key-up half right away
            if !app.release_backspace && key.kind == KeyEventKind::Press {
                app.picker.backspace_release();
            }
        }
        (_, KeyCode::Esc) => app.picker.blur(now),
        (_, KeyCode::Tab) => app.picker.focus(now),
        (_, KeyCode::Up) => {
            if app.picker.dropdown_visible() {
                app.picker.move_up();
            }
        }
        (_, KeyCode::Down) => {
            if app.picker.dropdown_visible() {
                app.picker.move_down();
            } else {
                app.picker.focus(now);
            }
        }
        (_, KeyCode::Enter) => {
            app.picker.pick_at_cursor();
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.picker.type_char(c);
        }
        _ => {}
    }
}

/// Left clicks on the regions recorded by the last render
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, now: Instant) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    match app.hit_at(mouse.column, mouse.row).cloned() {
        Some(Hit::Input) => app.picker.focus(now),
        Some(Hit::DropdownRow(label)) => {
            app.picker.pick(&label);
        }
        Some(Hit::ChipDismiss(label)) => {
            app.picker.dismiss(&label);
        }
        Some(Hit::Chip(_)) => {}
        None => {
            if !app.inside_widget(mouse.column, mouse.row) {
                app.picker.blur(now);
            }
        }
    }
}

/// Bracketed paste: appended to the query with newlines flattened
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    let clean = text.replace('\n', " ").replace('\r', "");
    app.picker.type_str(&clean);
}
