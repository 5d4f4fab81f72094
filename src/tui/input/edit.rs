use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

use crate::tui::app::{App, Mode};

/// Keys while typing in the input line (Add) or in a row (Edit)
pub(super) fn handle_text_input(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => cancel_text_input(app),
        (_, KeyCode::Enter) => confirm_text_input(app),

        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => app.edit.home(),
        (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => app.edit.end(),
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.edit.delete_word_back(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.edit.clear(),

        (_, KeyCode::Backspace) => app.edit.backspace(),
        (_, KeyCode::Delete) => app.edit.delete(),
        (_, KeyCode::Left) => app.edit.move_left(),
        (_, KeyCode::Right) => app.edit.move_right(),

        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.edit.insert_char(c);
        }
        _ => {}
    }
}

/// Esc: leave the mode; an in-place edit is discarded.
fn cancel_text_input(app: &mut App) {
    if let Mode::Edit { index } = app.mode {
        debug!("event=edit_discarded index={}", index);
    }
    app.edit.clear();
    app.mode = Mode::Navigate;
}

fn confirm_text_input(app: &mut App) {
    match app.mode {
        Mode::Add => {
            let text = app.edit.take();
            let result = app.store.add(&text);
            let saved = result.is_ok();
            if app.apply(result).is_applied() {
                app.cursor = app.store.len() - 1;
                if saved {
                    app.flash("added");
                }
            }
        }
        Mode::Edit { index } => {
            let text = app.edit.take();
            app.mode = Mode::Navigate;
            if index < app.store.len() {
                let result = app.store.rename(index, &text);
                app.apply(result);
            }
        }
        Mode::Navigate | Mode::Move => {}
    }
}
