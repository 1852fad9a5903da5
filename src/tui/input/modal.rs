use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::*;

pub(super) fn handle_modal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.cancel_modal();
            return;
        }
        KeyCode::Enter => {
            app.submit_modal();
            return;
        }
        _ => {}
    }

    let project_ids: Vec<u32> = app.portfolio.iter().map(|p| p.id).collect();
    let Some(modal) = app.modal.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Tab | KeyCode::Down => modal.focus_next(),
        KeyCode::BackTab | KeyCode::Up => modal.focus_prev(),
        KeyCode::Left => modal.left(&project_ids),
        KeyCode::Right => modal.right(&project_ids),
        KeyCode::Home => modal.cursor_home(),
        KeyCode::End => modal.cursor_end(),
        KeyCode::Backspace => modal.backspace(),
        KeyCode::Delete => modal.delete_forward(),
        _ => {
            if let Some(c) = typed_char(&key) {
                modal.insert_char(c);
            }
        }
    }
}
