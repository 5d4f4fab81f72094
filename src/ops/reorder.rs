//! Drag-to-reorder state machine.
//!
//! A drag runs `Idle → Dragging → (Drop | Cancelled) → Idle`. While
//! dragging, the controller owns a provisional *visual order*: the list of
//! original task indices in the order they are currently drawn. Hover and
//! nudge only rearrange that list. Nothing reaches the task store until
//! [`ReorderController::release`] maps the visual order back to tasks and
//! hands the caller one full sequence for `TaskStore::reorder`.

use log::{debug, warn};

use crate::model::task::Task;

/// Vertical extent of one drawn row, in screen rows. `top` may be negative
/// for rows scrolled above the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub top: i32,
    pub height: i32,
}

impl RowSpan {
    /// True when the row's vertical midpoint lies below `y`.
    fn midpoint_below(&self, y: i32) -> bool {
        2 * y < 2 * self.top + self.height
    }
}

/// An in-progress drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    /// Index of the dragged task, captured once at drag start
    origin: usize,
    /// Collection length at drag start
    len: usize,
    /// Original indices in current visual order
    order: Vec<usize>,
}

impl DragSession {
    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Visual slot the dragged task currently occupies
    pub fn position(&self) -> usize {
        self.order
            .iter()
            .position(|&i| i == self.origin)
            .unwrap_or(self.origin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// How a drag ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEnd {
    /// Dropped: the full new sequence for one `reorder` call.
    Drop(Vec<Task>),
    /// Abandoned, or the list changed under the drag. No reorder.
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct ReorderController {
    state: DragState,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Provisional order of original indices, while dragging
    pub fn visual_order(&self) -> Option<&[usize]> {
        self.session().map(DragSession::order)
    }

    /// Start dragging the task at `index` of a list of `len` tasks.
    /// Returns false (and stays put) if a drag is already running or the
    /// index is out of range.
    pub fn begin(&mut self, index: usize, len: usize) -> bool {
        if self.is_dragging() || index >= len {
            return false;
        }
        debug!("event=drag_begin index={} len={}", index, len);
        self.state = DragState::Dragging(DragSession {
            origin: index,
            len,
            order: (0..len).collect(),
        });
        true
    }

    /// Pointer moved to screen row `pointer_y`. `layout[slot]` is where
    /// visual slot `slot` is drawn. The dragged task is placed before the
    /// first other row whose midpoint is below the pointer, or at the end.
    pub fn hover(&mut self, pointer_y: i32, layout: &[RowSpan]) {
        let DragState::Dragging(session) = &mut self.state else {
            return;
        };
        let current = session.position();
        let before = layout
            .iter()
            .enumerate()
            .take(session.order.len())
            .filter(|(slot, _)| *slot != current)
            .find(|(_, span)| span.midpoint_below(pointer_y))
            .map(|(slot, _)| session.order[slot]);

        let dragged = session.order.remove(current);
        let target = match before {
            Some(anchor) => session
                .order
                .iter()
                .position(|&i| i == anchor)
                .unwrap_or(session.order.len()),
            None => session.order.len(),
        };
        session.order.insert(target, dragged);
    }

    /// Move the dragged task `delta` slots (keyboard moves), clamped.
    pub fn nudge(&mut self, delta: isize) {
        let DragState::Dragging(session) = &mut self.state else {
            return;
        };
        let current = session.position();
        let last = session.order.len().saturating_sub(1);
        let target = current.saturating_add_signed(delta).min(last);
        if target != current {
            let dragged = session.order.remove(current);
            session.order.insert(target, dragged);
        }
    }

    /// Pointer released over the list. Maps the visual order back to
    /// `tasks` through the indices captured at drag start. If `tasks` no
    /// longer has the length seen at drag start, the drag is cancelled.
    pub fn release(&mut self, tasks: &[Task]) -> DragEnd {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return DragEnd::Cancelled;
        };
        if tasks.len() != session.len {
            warn!(
                "event=drag_stale started_len={} now_len={}",
                session.len,
                tasks.len()
            );
            return DragEnd::Cancelled;
        }
        debug!(
            "event=drag_drop origin={} position={}",
            session.origin,
            session.position()
        );
        DragEnd::Drop(session.order.iter().map(|&i| tasks[i].clone()).collect())
    }

    /// Gesture abandoned. The view falls back to the store's order.
    pub fn cancel(&mut self) -> DragEnd {
        if self.is_dragging() {
            debug!("event=drag_cancel");
        }
        self.state = DragState::Idle;
        DragEnd::Cancelled
    }
}
