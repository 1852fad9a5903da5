use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

/// Typing in search mode filters the list as each key lands
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel: restore what was there before `/`
        KeyCode::Esc => {
            let previous = std::mem::take(&mut app.search_backup);
            app.set_search(previous);
            app.mode = Mode::Navigate;
        }
        // Keep the current text
        KeyCode::Enter => {
            app.search_backup.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            let mut text = app.filter.search.clone();
            text.pop();
            app.set_search(text);
        }
        _ => {
            if let Some(c) = typed_char(&key) {
                let mut text = app.filter.search.clone();
                text.push(c);
                app.set_search(text);
            }
        }
    }
}

/// Enter search mode from the projects tab
pub(super) fn begin_search(app: &mut App) {
    app.search_backup = app.filter.search.clone();
    app.mode = Mode::Search;
}
