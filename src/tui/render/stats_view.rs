use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::tui::app::App;

const LABEL_WIDTH: usize = 18;

/// Totals for the whole list and a completion gauge
pub fn render_stats_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let progress = app.progress();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            " Statistics ",
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // padding
            Constraint::Length(4), // numbers
            Constraint::Length(1), // padding
            Constraint::Length(1), // gauge
            Constraint::Min(0),
        ])
        .split(inner);

    let rows = [
        ("Total tasks", progress.total.to_string()),
        ("Completed", progress.completed.to_string()),
        ("Remaining", progress.remaining().to_string()),
        ("Completion rate", format!("{}%", progress.percent)),
    ];
    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("  {:<width$}", label, width = LABEL_WIDTH),
                    Style::default().fg(app.theme.text),
                ),
                Span::styled(
                    value,
                    Style::default()
                        .fg(app.theme.text_bright)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), chunks[1]);

    let gauge_area = Rect {
        x: chunks[3].x + 2,
        width: chunks[3].width.saturating_sub(4),
        ..chunks[3]
    };
    let gauge = Gauge::default()
        .ratio(progress.ratio())
        .label(format!("{}%", progress.percent))
        .gauge_style(
            Style::default()
                .fg(app.theme.ring_color(&progress))
                .bg(app.theme.ring_track),
        );
    frame.render_widget(gauge, gauge_area);
}
