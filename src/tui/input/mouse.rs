use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::{App, Mode, PendingPress, Tab};

use super::navigate::move_cursor;
use super::{cancel_dragged, drop_dragged, toggle_task};

/// Press on a row, then either release on the same row (click: toggle) or
/// move to another row (drag: reorder, committed on release over the list).
pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Navigate || app.tab != Tab::Tasks {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.press = app
                .slot_at(mouse.column, mouse.row)
                .map(|index| PendingPress {
                    index,
                    row: mouse.row,
                });
            if let Some(press) = app.press {
                app.cursor = press.index;
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if !app.reorder.is_dragging() {
                let Some(press) = app.press else { return };
                if mouse.row == press.row || !app.reorder.begin(press.index, app.store.len()) {
                    return;
                }
            }
            let layout = app.row_layout();
            app.reorder.hover(i32::from(mouse.row), &layout);
            if let Some(session) = app.reorder.session() {
                app.cursor = session.position();
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let press = app.press.take();
            if app.reorder.is_dragging() {
                if app.in_list(mouse.column, mouse.row) {
                    drop_dragged(app);
                } else {
                    cancel_dragged(app);
                }
            } else if let Some(press) = press
                && app.slot_at(mouse.column, mouse.row) == Some(press.index)
            {
                toggle_task(app, press.index);
            }
        }
        MouseEventKind::ScrollDown if !app.reorder.is_dragging() => move_cursor(app, 1),
        MouseEventKind::ScrollUp if !app.reorder.is_dragging() => move_cursor(app, -1),
        _ => {}
    }
}
