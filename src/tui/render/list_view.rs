use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::tui::app::{App, Mode};

use super::helpers::{spans_width, truncate_to_width};

const PROMPT: &str = " \u{203A} ";

/// Input line, separator, then the task rows
pub fn render_list_column(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // input line
            Constraint::Length(1), // separator
            Constraint::Min(1),    // rows
        ])
        .split(area);

    render_input_line(frame, app, chunks[0]);
    let sep = Paragraph::new("\u{2500}".repeat(chunks[1].width as usize))
        .style(Style::default().fg(app.theme.ring_track).bg(app.theme.background));
    frame.render_widget(sep, chunks[1]);
    render_rows(frame, app, chunks[2]);
}

fn render_input_line(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let prompt_style = Style::default().fg(app.theme.highlight).bg(bg);

    let line = if app.mode == Mode::Add {
        let text = app.edit.text();
        let cursor_x = area.x + (PROMPT.chars().count() + app.edit.cursor_col()) as u16;
        if cursor_x < area.right() {
            frame.set_cursor_position(Position::new(cursor_x, area.y));
        }
        Line::from(vec![
            Span::styled(PROMPT, prompt_style),
            Span::styled(
                text.to_string(),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled(
                "Add a new task (a)",
                Style::default()
                    .fg(app.theme.dim)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn render_rows(frame: &mut Frame, app: &mut App, area: Rect) {
    app.list_area = area;
    let bg = app.theme.background;

    if app.store.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  No tasks yet.",
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .style(Style::default().bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    adjust_scroll(app, height);

    let order = app.visible_order();
    let dragged = app.reorder.session().map(|s| s.origin());
    let editing = match app.mode {
        Mode::Edit { index } => Some(index),
        _ => None,
    };

    let mut lines: Vec<Line> = Vec::with_capacity(height);
    for (slot, &index) in order
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
    {
        // Indices captured at drag start may be stale after a reload
        let Some(task) = app.store.get(index) else {
            continue;
        };
        let row = RowContext {
            is_cursor: slot == app.cursor,
            is_dragged: dragged == Some(index),
            is_editing: editing == Some(index),
        };
        let y = area.y + (slot - app.scroll_offset) as u16;
        if row.is_editing {
            let prefix_w = checkbox_prefix(task).len() as u16;
            let cursor_x = area.x + prefix_w + app.edit.cursor_col() as u16;
            if cursor_x < area.right() {
                frame.set_cursor_position(Position::new(cursor_x, y));
            }
        }
        lines.push(task_line(app, task, row, area.width as usize));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[derive(Debug, Clone, Copy)]
struct RowContext {
    is_cursor: bool,
    is_dragged: bool,
    is_editing: bool,
}

fn checkbox_prefix(task: &Task) -> String {
    format!(" {} ", task.checkbox())
}

fn task_line<'a>(app: &App, task: &Task, row: RowContext, width: usize) -> Line<'a> {
    let theme = &app.theme;
    let bg = if row.is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };

    let box_color = if task.completed {
        theme.green
    } else {
        theme.dim
    };
    let mut name_style = if task.completed {
        Style::default()
            .fg(theme.dim)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text)
    };
    if row.is_cursor {
        name_style = name_style.fg(theme.text_bright);
    }
    if row.is_dragged {
        name_style = name_style.fg(theme.highlight).add_modifier(Modifier::BOLD);
    }

    let mut spans = vec![Span::styled(
        checkbox_prefix(task),
        Style::default().fg(box_color).bg(bg),
    )];
    let room = width.saturating_sub(spans_width(&spans));

    if row.is_editing {
        // Show the whole buffer; the terminal cursor marks the edit point
        spans.push(Span::styled(
            app.edit.text().to_string(),
            Style::default().fg(theme.text_bright).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            truncate_to_width(&task.name, room),
            name_style.bg(bg),
        ));
    }
    if row.is_dragged {
        spans.push(Span::styled(
            " \u{2195}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
    }

    // Fill the rest of the row so the selection band spans the width
    let used = spans_width(&spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
    Line::from(spans)
}

/// Keep the cursor row inside the viewport
fn adjust_scroll(app: &mut App, height: usize) {
    if height == 0 {
        return;
    }
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }
    let max_offset = app.store.len().saturating_sub(height);
    app.scroll_offset = app.scroll_offset.min(max_offset);
}
