use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, StatusKind, Tab};

use super::helpers::spans_width;

fn key_hints(app: &App) -> &'static str {
    match (app.tab, app.mode) {
        (Tab::Stats, _) => "Tab tasks  q quit",
        (_, Mode::Navigate) => "a add  e edit  space toggle  d delete  m move  Tab stats  q quit",
        (_, Mode::Add) => "Enter add  Esc done",
        (_, Mode::Edit { .. }) => "Enter save  Esc cancel",
        (_, Mode::Move) => "j/k move  Enter drop  Esc cancel",
    }
}

/// Render the status row (bottom of screen): a fresh message on the left,
/// key hints on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(status) = &app.status
        && !status.is_expired(Instant::now())
    {
        let color = match status.kind {
            StatusKind::Info => app.theme.green,
            StatusKind::Error => app.theme.red,
        };
        spans.push(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color).bg(bg),
        ));
    }

    if app.config.ui.show_key_hints {
        let hint = key_hints(app);
        let content_width = spans_width(&spans);
        let hint_width = hint.chars().count();
        if content_width + hint_width + 1 < width {
            let padding = width - content_width - hint_width - 1;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
