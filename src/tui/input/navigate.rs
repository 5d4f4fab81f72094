use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode, Tab};
use crate::tui::edit_line::EditLine;

use super::move_mode::start_move;
use super::{cancel_dragged, toggle_task};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // The cursor is a visual slot while a mouse drag is live, not a task
    if app.reorder.is_dragging() {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
                app.should_quit = true;
            }
            (_, KeyCode::Esc) => cancel_dragged(app),
            _ => {}
        }
        return;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Tab) => app.tab = app.tab.next(),
        (_, KeyCode::Char('1')) => app.tab = Tab::Tasks,
        (_, KeyCode::Char('2')) => app.tab = Tab::Stats,
        _ if app.tab == Tab::Tasks => handle_task_keys(app, key),
        _ => {}
    }
}

fn handle_task_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.cursor = app.store.len().saturating_sub(1),
        KeyCode::Char('a') => {
            app.edit.clear();
            app.mode = Mode::Add;
        }
        KeyCode::Char('e') => start_edit(app),
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => toggle_task(app, app.cursor),
        KeyCode::Char('d') | KeyCode::Delete => delete_at_cursor(app),
        KeyCode::Char('m') => start_move(app),
        _ => {}
    }
}

pub(super) fn move_cursor(app: &mut App, delta: isize) {
    let last = app.store.len().saturating_sub(1);
    app.cursor = app.cursor.saturating_add_signed(delta).min(last);
}

/// Open the cursor row for in-place editing, cursor at the end of the name.
fn start_edit(app: &mut App) {
    let Some(task) = app.store.get(app.cursor) else {
        return;
    };
    app.edit = EditLine::with_text(&task.name);
    app.mode = Mode::Edit { index: app.cursor };
}

fn delete_at_cursor(app: &mut App) {
    if app.cursor >= app.store.len() {
        return;
    }
    let result = app.store.delete(app.cursor);
    app.apply(result);
}
