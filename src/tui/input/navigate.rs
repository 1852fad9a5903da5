use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Tab};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts everything until dismissed
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    // A stale message goes away on the next key
    app.status_message = None;

    if handle_global(app, key) {
        return;
    }

    match app.tab {
        Tab::Projects => handle_projects_tab(app, key),
        Tab::Dashboard => {}
        Tab::Details => handle_details_tab(app, key),
    }
}

/// Keys that work on every tab. Returns true when the key was consumed.
fn handle_global(app: &mut App, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => app.should_quit = true,
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,
        (KeyModifiers::NONE, KeyCode::Char('1')) => app.switch_tab(Tab::Projects),
        (KeyModifiers::NONE, KeyCode::Char('2')) => app.switch_tab(Tab::Dashboard),
        (KeyModifiers::NONE, KeyCode::Char('3')) => app.switch_tab(Tab::Details),
        (KeyModifiers::NONE, KeyCode::Tab) => app.next_tab(),
        (KeyModifiers::NONE, KeyCode::Char('n')) => app.open_new_project(),
        (KeyModifiers::NONE, KeyCode::Char('t')) => app.open_new_task(),
        (KeyModifiers::NONE, KeyCode::Char('u')) => app.undo(),
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => app.redo(),
        _ => return false,
    }
    true
}

fn handle_projects_tab(app: &mut App, key: KeyEvent) {
    let cursor_id = app.cursor_project().map(|p| p.id);
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => app.move_list_cursor(1),
        (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => app.move_list_cursor(-1),
        (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => app.list_cursor = 0,
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (KeyModifiers::NONE, KeyCode::End) => {
            app.move_list_cursor(isize::MAX)
        }
        (KeyModifiers::NONE, KeyCode::Enter) => {
            if let Some(id) = cursor_id {
                app.open_details(id);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('e')) => {
            if let Some(id) = cursor_id {
                app.open_edit_project(id);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            if let Some(id) = cursor_id {
                app.request_delete_project(id);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('/')) => begin_search(app),
        (KeyModifiers::NONE, KeyCode::Char('p')) => app.cycle_priority_filter(),
        (KeyModifiers::NONE, KeyCode::Char('s')) => app.cycle_status_filter(),
        (_, KeyCode::Esc) => app.clear_filters(),
        _ => {}
    }
}

fn handle_details_tab(app: &mut App, key: KeyEvent) {
    let Some(project_id) = app.selected_project else {
        return;
    };
    let task_id = app.cursor_task().map(|t| t.id);
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => app.move_task_cursor(1),
        (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => app.move_task_cursor(-1),
        (KeyModifiers::NONE, KeyCode::Char(' ')) => {
            if let Some(task_id) = task_id {
                app.toggle_task(project_id, task_id);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('s')) => {
            if let Some(task_id) = task_id {
                app.cycle_task_status(project_id, task_id);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('e')) => {
            if let Some(task_id) = task_id {
                app.open_edit_task(project_id, task_id);
            }
        }
        (KeyModifiers::SHIFT, KeyCode::Char('E')) => app.open_edit_project(project_id),
        (KeyModifiers::NONE, KeyCode::Char('x')) => {
            if let Some(task_id) = task_id {
                app.request_delete_task(project_id, task_id);
            }
        }
        (KeyModifiers::SHIFT, KeyCode::Char('D')) => app.request_delete_project(project_id),
        (KeyModifiers::NONE, KeyCode::Char('f')) => app.cycle_task_filter(),
        (_, KeyCode::Esc) => app.back_to_list(),
        _ => {}
    }
}
