mod edit;
mod mouse;
mod move_mode;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use log::debug;

use crate::ops::reorder::DragEnd;

use super::app::{App, Mode};

use edit::handle_text_input;
use move_mode::handle_move;
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add | Mode::Edit { .. } => handle_text_input(app, key),
        Mode::Move => handle_move(app, key),
    }
}

/// Handle a mouse event. Only the task list in Navigate mode reacts.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    mouse::handle_mouse(app, mouse);
}

/// Handle a bracketed paste: inserted at the cursor while typing.
pub fn handle_paste(app: &mut App, text: &str) {
    if matches!(app.mode, Mode::Add | Mode::Edit { .. }) && !text.is_empty() {
        app.edit.insert_str(text);
    }
}

/// Finish a drag (mouse or keyboard) with a drop: one `reorder` call with
/// the full new order. The cursor follows the dropped task.
fn drop_dragged(app: &mut App) {
    let position = app.reorder.session().map(|s| s.position());
    match app.reorder.release(app.store.tasks()) {
        DragEnd::Drop(order) => {
            let result = app.store.reorder(order);
            app.apply(result);
            if let Some(position) = position {
                app.cursor = position;
                app.clamp_cursor();
            }
        }
        DragEnd::Cancelled => debug!("event=drop_cancelled"),
    }
}

/// Abandon a drag; the list falls back to the store's order.
fn cancel_dragged(app: &mut App) {
    if let Some(origin) = app.reorder.session().map(|s| s.origin()) {
        app.cursor = origin;
    }
    app.reorder.cancel();
    app.clamp_cursor();
}

/// Flip the task at `index`.
fn toggle_task(app: &mut App, index: usize) {
    if index >= app.store.len() {
        return;
    }
    let result = app.store.toggle(index);
    app.apply(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::{JsonFileStorage, TaskStorage};
    use crate::model::AppConfig;
    use crate::ops::task_store::TaskStore;
    use crate::tui::app::{StatusKind, Tab};
    use crate::tui::render::test_helpers::{app_with, app_with_tasks, names};
    use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};
    use pretty_assertions::assert_eq;
    use ratatui::layout::Rect;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
        handle_mouse(
            app,
            MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    /// Tasks drawn one per row from screen row 3
    fn with_list_area(mut app: App) -> App {
        app.list_area = Rect::new(0, 3, 40, 10);
        app.screen = Rect::new(0, 0, 40, 14);
        app
    }

    /// App over a real tasks.json so another writer can be simulated
    fn app_on_disk(tmp: &TempDir, names: &[&str]) -> App {
        let storage: Box<dyn TaskStorage> = Box::new(JsonFileStorage::new(tmp.path()));
        let mut app = App::new(TaskStore::open(storage), AppConfig::default());
        for name in names {
            let result = app.store.add(name);
            app.apply(result);
        }
        app.cursor = 0;
        app
    }

    fn write_externally(tmp: &TempDir, json: &str) {
        std::fs::write(tmp.path().join("tasks.json"), json).unwrap();
    }

    const REVERSED: &str = r#"[
        {"name": "C", "completed": false},
        {"name": "B", "completed": false},
        {"name": "A", "completed": false}
    ]"#;

    // --- add ---

    #[test]
    fn add_appends_and_flashes() {
        let mut app = app_with(&["Buy milk"]);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Add);
        type_text(&mut app, "  Walk dog ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(names(&app), vec!["Buy milk", "Walk dog"]);
        assert_eq!(app.cursor, 1);
        assert_eq!(app.edit.text(), "");
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.text, "added");
        assert_eq!(status.kind, StatusKind::Info);
        // Stays in Add mode for the next entry
        assert_eq!(app.mode, Mode::Add);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn add_blank_is_silent() {
        let mut app = app_with(&["a"]);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.len(), 1);
        assert!(app.status.is_none());
    }

    // --- edit ---

    #[test]
    fn edit_prefills_and_saves_on_enter() {
        let mut app = app_with(&["Buy milk", "Walk dog"]);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Edit { index: 1 });
        assert_eq!(app.edit.text(), "Walk dog");
        assert_eq!(app.edit.cursor(), "Walk dog".len());

        type_text(&mut app, " twice");
        press(&mut app, KeyCode::Enter);
        assert_eq!(names(&app), vec!["Buy milk", "Walk dog twice"]);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn edit_escape_discards() {
        let mut app = app_with(&["Buy milk"]);
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Esc);
        assert_eq!(names(&app), vec!["Buy milk"]);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn edit_to_blank_keeps_old_name() {
        let mut app = app_with(&["Buy milk"]);
        press(&mut app, KeyCode::Char('e'));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.edit.text(), "");
        press(&mut app, KeyCode::Enter);
        assert_eq!(names(&app), vec!["Buy milk"]);
    }

    #[test]
    fn edit_on_empty_list_does_nothing() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn paste_goes_into_edit_buffer_only_while_typing() {
        let mut app = app_with(&[]);
        handle_paste(&mut app, "ignored");
        assert_eq!(app.edit.text(), "");
        press(&mut app, KeyCode::Char('a'));
        handle_paste(&mut app, "line one\nline two");
        assert_eq!(app.edit.text(), "line one line two");
    }

    // --- toggle / delete / cursor ---

    #[test]
    fn toggle_keys_flip_the_cursor_row() {
        let mut app = app_with(&["a", "b"]);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.tasks()[0].completed);
        press(&mut app, KeyCode::Enter);
        assert!(!app.store.tasks()[0].completed);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.store.tasks()[1].completed);
    }

    #[test]
    fn delete_removes_cursor_row_and_clamps() {
        let mut app = app_with(&["A", "B", "C"]);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor, 2);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(names(&app), vec!["A", "B"]);
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Delete);
        assert_eq!(names(&app), vec!["B"]);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = app_with(&["a", "b"]);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn toggle_and_delete_on_empty_list_are_noops() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('m'));
        assert!(app.store.is_empty());
        assert_eq!(app.mode, Mode::Navigate);
    }

    // --- tabs / quit ---

    #[test]
    fn tab_switching_and_quit() {
        let mut app = app_with(&["a"]);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Stats);
        // Task keys do nothing on the stats tab
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.len(), 1);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.tab, Tab::Tasks);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.tab, Tab::Stats);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn q_is_text_while_adding() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "quit smoking");
        assert!(!app.should_quit);
        assert_eq!(app.edit.text(), "quit smoking");
    }

    // --- keyboard move ---

    #[test]
    fn move_mode_commits_on_enter() {
        let mut app = app_with(&["A", "B", "C"]);
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.mode, Mode::Move);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 2);
        // Nothing persisted until the drop
        assert_eq!(names(&app), vec!["A", "B", "C"]);
        assert_eq!(app.visible_order(), vec![1, 2, 0]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(names(&app), vec!["B", "C", "A"]);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn move_mode_escape_restores_order() {
        let mut app = app_with(&["A", "B", "C"]);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Esc);
        assert_eq!(names(&app), vec!["A", "B", "C"]);
        assert_eq!(app.cursor, 1);
        assert!(!app.reorder.is_dragging());
    }

    // --- mouse ---

    #[test]
    fn click_toggles_row() {
        let mut app = with_list_area(app_with(&["A", "B"]));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 4);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 4);
        assert!(app.store.tasks()[1].completed);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn click_outside_rows_does_nothing() {
        let mut app = with_list_area(app_with(&["A"]));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 8);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 8);
        assert!(!app.store.tasks()[0].completed);
    }

    #[test]
    fn drag_reorders_on_release() {
        let mut app = with_list_area(app_with(&["A", "B", "C"]));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 3);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 4);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 6);
        assert!(app.reorder.is_dragging());
        assert_eq!(names(&app), vec!["A", "B", "C"]);

        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 6);
        assert_eq!(names(&app), vec!["B", "C", "A"]);
        // A drag is not a click
        assert!(app.store.tasks().iter().all(|t| !t.completed));
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn release_outside_list_cancels_drag() {
        let mut app = with_list_area(app_with(&["A", "B", "C"]));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 3);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 6);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 20);
        assert_eq!(names(&app), vec!["A", "B", "C"]);
        assert!(!app.reorder.is_dragging());
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn sideways_jiggle_is_still_a_click() {
        let mut app = with_list_area(app_with(&["A", "B"]));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 3);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 6, 3);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 6, 3);
        assert!(!app.reorder.is_dragging());
        assert!(app.store.tasks()[0].completed);
    }

    #[test]
    fn mouse_ignored_while_typing() {
        let mut app = with_list_area(app_with(&["A"]));
        press(&mut app, KeyCode::Char('a'));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 3);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 3);
        assert!(!app.store.tasks()[0].completed);
    }

    #[test]
    fn finishing_by_click_starts_confetti() {
        let mut app = with_list_area(app_with_tasks(&[("A", true), ("B", false)]));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 4);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 4);
        assert!(app.confetti.is_some());
    }

    // --- external reload mid-gesture ---

    #[test]
    fn edit_follows_task_across_reload() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_on_disk(&tmp, &["A", "B", "C"]);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "2");

        write_externally(&tmp, REVERSED);
        app.reload_from_disk();
        assert_eq!(app.mode, Mode::Edit { index: 2 });
        assert_eq!(app.cursor, 2);

        press(&mut app, KeyCode::Enter);
        assert_eq!(names(&app), vec!["C", "B", "A2"]);
    }

    #[test]
    fn edit_of_changed_task_is_dropped_on_reload() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_on_disk(&tmp, &["A", "B", "C"]);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "2");

        write_externally(
            &tmp,
            r#"[{"name":"X","completed":false},{"name":"B","completed":false},{"name":"C","completed":false}]"#,
        );
        app.reload_from_disk();
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.edit.text(), "");
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
        assert_eq!(names(&app), vec!["X", "B", "C"]);
    }

    #[test]
    fn move_mode_is_cancelled_by_reload() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_on_disk(&tmp, &["A", "B", "C"]);
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.mode, Mode::Move);

        write_externally(&tmp, REVERSED);
        app.reload_from_disk();
        assert_eq!(app.mode, Mode::Navigate);
        assert!(!app.reorder.is_dragging());
        assert_eq!(app.cursor, 0);

        // j/k move the cursor again rather than a stale drag
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 1);
        assert_eq!(names(&app), vec!["C", "B", "A"]);
    }

    #[test]
    fn mouse_drag_is_cancelled_by_reload() {
        let tmp = TempDir::new().unwrap();
        let mut app = with_list_area(app_on_disk(&tmp, &["A", "B", "C"]));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 3);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 4);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 6);
        assert!(app.reorder.is_dragging());

        write_externally(&tmp, REVERSED);
        app.reload_from_disk();
        assert!(!app.reorder.is_dragging());
        assert!(app.press.is_none());

        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 6);
        assert_eq!(names(&app), vec!["C", "B", "A"]);
        assert!(app.store.tasks().iter().all(|t| !t.completed));
    }

    #[test]
    fn pending_click_is_forgotten_on_reload() {
        let tmp = TempDir::new().unwrap();
        let mut app = with_list_area(app_on_disk(&tmp, &["A", "B", "C"]));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 3);
        assert!(app.press.is_some());

        write_externally(&tmp, REVERSED);
        app.reload_from_disk();
        assert!(app.press.is_none());

        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 3);
        assert!(app.store.tasks().iter().all(|t| !t.completed));
    }

    #[test]
    fn task_keys_ignored_during_mouse_drag() {
        let mut app = with_list_area(app_with(&["A", "B", "C"]));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 3);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 4);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 6);
        assert_eq!(app.cursor, 2);

        for key in ['x', ' ', 'd', 'e', 'm', 'a'] {
            press(&mut app, KeyCode::Char(key));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.reorder.is_dragging());

        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 6);
        assert_eq!(names(&app), vec!["B", "C", "A"]);
        assert!(app.store.tasks().iter().all(|t| !t.completed));
    }

    #[test]
    fn esc_cancels_mouse_drag() {
        let mut app = with_list_area(app_with(&["A", "B", "C"]));
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 3);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 6);
        press(&mut app, KeyCode::Esc);
        assert!(!app.reorder.is_dragging());
        assert_eq!(app.cursor, 0);

        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 6);
        assert_eq!(names(&app), vec!["A", "B", "C"]);
        assert!(app.store.tasks().iter().all(|t| !t.completed));
    }
}
