use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::{cancel_dragged, drop_dragged};

/// `m`: pick up the task under the cursor.
pub(super) fn start_move(app: &mut App) {
    if app.reorder.begin(app.cursor, app.store.len()) {
        app.mode = Mode::Move;
    }
}

pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => nudge(app, 1),
        KeyCode::Char('k') | KeyCode::Up => nudge(app, -1),
        KeyCode::Char('g') | KeyCode::Home => nudge(app, isize::MIN),
        KeyCode::Char('G') | KeyCode::End => nudge(app, isize::MAX),
        KeyCode::Enter | KeyCode::Char('m') => {
            drop_dragged(app);
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            cancel_dragged(app);
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn nudge(app: &mut App, delta: isize) {
    app.reorder.nudge(delta);
    if let Some(session) = app.reorder.session() {
        app.cursor = session.position();
    }
}
